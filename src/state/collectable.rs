use super::animation::{Animated, AnimationPlayer, AnimationSpec};
use super::common::{Hitbox, Insets};
use rand::Rng;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CollectableKind {
    Coin,
    Bottle,
}

/// Two-frame idle bob; coins flicker faster than ground bottles.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Bob(CollectableKind);

impl Animated for Bob {
    fn spec(&self) -> AnimationSpec {
        match self.0 {
            CollectableKind::Coin => AnimationSpec::looping(0, 1, 12),
            CollectableKind::Bottle => AnimationSpec::looping(0, 1, 36),
        }
    }
}

pub struct Collectable {
    pub kind: CollectableKind,
    pub hitbox: Hitbox,
    pub anim: AnimationPlayer<Bob>,
}

impl Collectable {
    pub fn spawn(kind: CollectableKind, rng: &mut impl Rng) -> Self {
        let (x, y, w, h) = match kind {
            CollectableKind::Coin => (400.0 + rng.random_range(0.0..2000.0), 75.0, 150.0, 150.0),
            CollectableKind::Bottle => {
                (200.0 + rng.random_range(0.0..2000.0), 333.0, 100.0, 100.0)
            }
        };
        Collectable {
            kind,
            hitbox: Hitbox::new(x, y, w, h, Insets::default()),
            anim: AnimationPlayer::new(Bob(kind)),
        }
    }

    pub fn update(&mut self, _tick: u64) {
        self.anim.advance(1);
    }
}
