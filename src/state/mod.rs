pub mod animation;
pub mod character;
pub mod chicken;
pub mod collectable;
pub mod common;
pub mod endboss;
pub mod level;
pub mod scenery;
pub mod session;
pub mod status_bar;
pub mod throwable;
pub mod world;

pub use common::{Dir, Energy, Hitbox, Insets};
pub use level::{Level, LevelConfig};
pub use session::{Outcome, Session, SessionStats};
pub use world::{InputState, World};
