pub mod camera;
pub mod menu;
pub mod render;
pub mod sound_handler;
pub mod state;
