use super::animation::{Animated, AnimationPlayer, AnimationSpec};
use super::common::{Energy, Hitbox, Insets};
use rand::Rng;

/// Animation state is re-evaluated every 9 ticks (150 ms).
pub const ANIM_STEP_TICKS: u64 = 9;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ChickenKind {
    Normal,
    Small,
}

impl ChickenKind {
    fn size(self) -> (f32, f32) {
        match self {
            ChickenKind::Normal => (75.0, 90.0),
            ChickenKind::Small => (50.0, 55.0),
        }
    }

    fn ground_y(self) -> f32 {
        match self {
            ChickenKind::Normal => 340.0,
            ChickenKind::Small => 372.0,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ChickenAnim {
    Walking,
    Dead,
}

impl Animated for ChickenAnim {
    fn spec(&self) -> AnimationSpec {
        match self {
            ChickenAnim::Walking => AnimationSpec::looping(0, 2, 9),
            ChickenAnim::Dead => AnimationSpec::once(3, 3, 9),
        }
    }
}

pub struct Chicken {
    pub id: u32,
    pub kind: ChickenKind,
    pub hitbox: Hitbox,
    pub speed: f32,
    pub energy: Energy,
    pub anim: AnimationPlayer<ChickenAnim>,
}

impl Chicken {
    pub fn spawn(id: u32, kind: ChickenKind, rng: &mut impl Rng) -> Self {
        let (w, h) = kind.size();
        Chicken {
            id,
            kind,
            hitbox: Hitbox::new(
                500.0 + rng.random_range(0.0..2000.0),
                kind.ground_y(),
                w,
                h,
                Insets {
                    left: 25.0,
                    right: 25.0,
                    ..Insets::default()
                },
            ),
            speed: 0.15 + rng.random_range(0.0..0.3),
            energy: Energy::full(),
            anim: AnimationPlayer::new(ChickenAnim::Walking),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.energy.is_dead()
    }

    /// Any kill (stomp or bottle) zeroes energy outright.
    pub fn kill(&mut self) {
        self.energy.kill();
        self.anim.set_state(ChickenAnim::Dead);
    }

    pub fn update(&mut self, tick: u64) {
        if !self.is_dead() {
            self.hitbox.x -= self.speed;
        }
        if tick % ANIM_STEP_TICKS == 0 {
            let next = if self.is_dead() {
                ChickenAnim::Dead
            } else {
                ChickenAnim::Walking
            };
            self.anim.set_state(next);
            self.anim.advance(ANIM_STEP_TICKS as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spawn_ranges_hold() {
        let mut rng = StdRng::seed_from_u64(7);
        for id in 0..50 {
            let chicken = Chicken::spawn(id, ChickenKind::Normal, &mut rng);
            assert!(chicken.hitbox.x >= 500.0 && chicken.hitbox.x < 2500.0);
            assert!(chicken.speed >= 0.15 && chicken.speed < 0.45);
            assert_eq!(chicken.hitbox.y, 340.0);
        }
    }

    #[test]
    fn dead_chicken_stops_walking() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut chicken = Chicken::spawn(0, ChickenKind::Small, &mut rng);
        let x = chicken.hitbox.x;
        chicken.kill();
        chicken.update(9);
        assert_eq!(chicken.hitbox.x, x);
        assert_eq!(*chicken.anim.state(), ChickenAnim::Dead);
    }
}
