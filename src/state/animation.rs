/// Frame range inside an entity's sprite strip plus the cycle speed.
pub struct AnimationSpec {
    pub start: u32,
    pub end: u32,
    /// Simulation ticks each frame stays on screen.
    pub ticks_per_frame: u32,
    pub loops: bool,
}

impl AnimationSpec {
    pub fn looping(start: u32, end: u32, ticks_per_frame: u32) -> Self {
        AnimationSpec {
            start,
            end,
            ticks_per_frame,
            loops: true,
        }
    }

    /// Plays once and holds the last frame (death poses, splash).
    pub fn once(start: u32, end: u32, ticks_per_frame: u32) -> Self {
        AnimationSpec {
            start,
            end,
            ticks_per_frame,
            loops: false,
        }
    }
}

pub trait Animated {
    fn spec(&self) -> AnimationSpec;
}

/// Cycles sprite-strip frames for one entity. Changing state rewinds to the
/// first frame of the new animation; staying in a state keeps cycling.
pub struct AnimationPlayer<S> {
    state: S,
    elapsed_ticks: u32,
}

impl<S: Animated + PartialEq> AnimationPlayer<S> {
    pub fn new(initial: S) -> Self {
        AnimationPlayer {
            state: initial,
            elapsed_ticks: 0,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn set_state(&mut self, next: S) {
        if self.state != next {
            self.state = next;
            self.elapsed_ticks = 0;
        }
    }

    pub fn advance(&mut self, ticks: u32) {
        self.elapsed_ticks += ticks;
    }

    /// Index into the entity's sprite strip for the current moment.
    pub fn frame(&self) -> u32 {
        let spec = self.state.spec();
        let count = spec.end - spec.start + 1;
        let step = self.elapsed_ticks / spec.ticks_per_frame.max(1);
        if spec.loops {
            spec.start + step % count
        } else {
            spec.start + step.min(count - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(PartialEq)]
    enum Probe {
        Cycle,
        Hold,
    }

    impl Animated for Probe {
        fn spec(&self) -> AnimationSpec {
            match self {
                Probe::Cycle => AnimationSpec::looping(0, 2, 2),
                Probe::Hold => AnimationSpec::once(3, 5, 2),
            }
        }
    }

    #[test]
    fn looping_wraps_around() {
        let mut player = AnimationPlayer::new(Probe::Cycle);
        let mut seen = vec![];
        for _ in 0..8 {
            seen.push(player.frame());
            player.advance(2);
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn one_shot_holds_last_frame() {
        let mut player = AnimationPlayer::new(Probe::Hold);
        player.advance(100);
        assert_eq!(player.frame(), 5);
    }

    #[test]
    fn state_change_rewinds() {
        let mut player = AnimationPlayer::new(Probe::Cycle);
        player.advance(5);
        player.set_state(Probe::Hold);
        assert_eq!(player.frame(), 3);
        // Re-setting the same state must not rewind.
        player.advance(2);
        player.set_state(Probe::Hold);
        assert_eq!(player.frame(), 4);
    }
}
