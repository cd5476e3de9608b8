#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Dir {
    Left,
    Right,
}

/// Simulation tick rate. All time-based rules are expressed against the
/// millisecond clock derived from the tick counter, so windows like "1500 ms"
/// are exact at tick granularity.
pub const TICKS_PER_SECOND: u64 = 60;

pub fn ticks_to_ms(ticks: u64) -> u64 {
    ticks * 1000 / TICKS_PER_SECOND
}

/// Per-side insets shrinking a sprite's bounding box down to the rectangle
/// actually used for collision tests. `right` may be negative to widen.
#[derive(Clone, Copy, Debug, Default)]
pub struct Insets {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub insets: Insets,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, w: f32, h: f32, insets: Insets) -> Self {
        Hitbox { x, y, w, h, insets }
    }

    pub fn left(&self) -> f32 {
        self.x + self.insets.left
    }

    pub fn right(&self) -> f32 {
        self.x + self.w - self.insets.right
    }

    pub fn top(&self) -> f32 {
        self.y + self.insets.top
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h - self.insets.bottom
    }

    /// Strict overlap on both axes; touching edges do not collide.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.right() > other.left()
            && self.bottom() > other.top()
            && self.left() < other.right()
            && self.top() < other.bottom()
    }
}

/// Health plus the hit bookkeeping shared by the character, chickens and the
/// boss: clamped energy and the last-hit timestamp driving hurt/grace states.
#[derive(Clone, Copy, Debug)]
pub struct Energy {
    pub value: f32,
    pub last_hit_ms: u64,
}

impl Energy {
    pub const MAX: f32 = 100.0;

    pub fn full() -> Self {
        Energy {
            value: Self::MAX,
            last_hit_ms: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.value == 0.0
    }

    /// Standard contact damage. No-op on a dead entity; the floor at zero
    /// drops the last-hit refresh, matching the hurt-state rules.
    pub fn hit(&mut self, damage: f32, now_ms: u64) {
        if self.is_dead() {
            return;
        }
        self.value -= damage;
        if self.value < 0.0 {
            self.value = 0.0;
        } else {
            self.last_hit_ms = now_ms;
        }
    }

    /// Bottle damage against the boss: any result below 10 collapses straight
    /// to zero. Intentional early-death threshold, not a symmetric floor.
    pub fn hit_by_bottle(&mut self, damage: f32, now_ms: u64) {
        if self.is_dead() {
            return;
        }
        self.value -= damage;
        if self.value < 10.0 {
            self.value = 0.0;
        } else {
            self.last_hit_ms = now_ms;
        }
    }

    pub fn kill(&mut self) {
        self.value = 0.0;
    }

    /// Hurt state lasts for `window_ms` after the last registered hit.
    pub fn is_hurt(&self, now_ms: u64, window_ms: u64) -> bool {
        self.last_hit_ms != 0 && now_ms.saturating_sub(self.last_hit_ms) < window_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hb(x: f32, y: f32) -> Hitbox {
        Hitbox::new(x, y, 100.0, 100.0, Insets::default())
    }

    #[test]
    fn overlap_is_strict() {
        let a = hb(0.0, 0.0);
        // Sharing an edge is not a collision.
        let b = hb(100.0, 0.0);
        assert!(!a.overlaps(&b));
        let c = hb(99.0, 0.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = hb(0.0, 0.0);
        let b = hb(50.0, 80.0);
        let c = hb(300.0, 0.0);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
    }

    #[test]
    fn insets_shrink_the_box() {
        let mut a = hb(0.0, 0.0);
        a.insets.right = 30.0;
        let b = hb(80.0, 0.0);
        // Full boxes would overlap, the inset ones do not.
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn hit_clamps_at_zero() {
        let mut e = Energy::full();
        e.hit(250.0, 10);
        assert_eq!(e.value, 0.0);
        assert!(e.is_dead());
        // Clamped hits do not refresh the hurt timestamp.
        assert_eq!(e.last_hit_ms, 0);
    }

    #[test]
    fn dead_is_terminal() {
        let mut e = Energy::full();
        e.kill();
        e.hit(5.0, 100);
        e.hit_by_bottle(19.0, 100);
        assert_eq!(e.value, 0.0);
    }

    #[test]
    fn bottle_hit_collapses_below_ten() {
        let mut e = Energy::full();
        for _ in 0..4 {
            e.hit_by_bottle(19.0, 50);
        }
        assert_eq!(e.value, 24.0);
        // 24 - 19 = 5 < 10: straight to zero.
        e.hit_by_bottle(19.0, 60);
        assert_eq!(e.value, 0.0);
    }

    #[test]
    fn hurt_window_expires() {
        let mut e = Energy::full();
        e.hit(0.5, 1000);
        assert!(e.is_hurt(1499, 500));
        assert!(!e.is_hurt(1500, 500));
    }

    #[test]
    fn tick_clock_is_exact_at_quarter_seconds() {
        assert_eq!(ticks_to_ms(90), 1500);
        assert_eq!(ticks_to_ms(30), 500);
    }
}
