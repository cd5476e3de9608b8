/// Discretizes a collected-item count onto the 6-step bar sprite.
pub fn collected_step(count: u32) -> usize {
    (count as usize).min(5)
}

/// Discretizes a health percentage onto the 6-step bar sprite. Only an exact
/// 100 shows the full bar, and anything at 20 or below (including zero)
/// still shows the first step rather than an empty bar. That bottom
/// behavior is long-standing and the end screens carry the real state, so
/// it stays.
pub fn percent_step(percent: f32) -> usize {
    if percent == 100.0 {
        5
    } else if percent > 80.0 {
        4
    } else if percent > 60.0 {
        3
    } else if percent > 40.0 {
        2
    } else {
        1
    }
}

pub struct StatusBar {
    pub x: f32,
    pub y: f32,
    pub step: usize,
}

impl StatusBar {
    pub const W: f32 = 200.0;
    pub const H: f32 = 60.0;

    pub fn new(x: f32, y: f32, step: usize) -> Self {
        StatusBar { x, y, step }
    }

    pub fn set_collected(&mut self, count: u32) {
        self.step = collected_step(count);
    }

    pub fn set_percent(&mut self, percent: f32) {
        self.step = percent_step(percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_map_one_to_one_then_cap() {
        assert_eq!(collected_step(0), 0);
        assert_eq!(collected_step(4), 4);
        assert_eq!(collected_step(5), 5);
        assert_eq!(collected_step(17), 5);
    }

    #[test]
    fn percent_thresholds() {
        assert_eq!(percent_step(100.0), 5);
        assert_eq!(percent_step(99.5), 4);
        assert_eq!(percent_step(81.0), 4);
        assert_eq!(percent_step(80.0), 3);
        assert_eq!(percent_step(61.0), 3);
        assert_eq!(percent_step(41.0), 2);
        assert_eq!(percent_step(21.0), 1);
    }

    #[test]
    fn zero_percent_still_shows_one_step() {
        assert_eq!(percent_step(0.0), 1);
    }
}
