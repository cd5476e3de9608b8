use super::animation::{Animated, AnimationPlayer, AnimationSpec};
use super::common::{Dir, Hitbox, Insets};
use crate::sound_handler::{AudioEvent, SoundCue};

pub const HORIZONTAL_SPEED: f32 = 10.0;
/// Horizontal motion lasts this many ticks (one second of flight).
pub const FLIGHT_TICKS: u32 = 60;
pub const INITIAL_SPEED_Y: f32 = 30.0;
pub const GRAVITY_DECAY: f32 = 2.5;
/// Bottles keep falling until well below the character's ground plane.
const AIRBORNE_BELOW_Y: f32 = 300.0;
/// Past this depth the bottle shatters on the ground.
const SPLASH_GROUND_Y: f32 = 240.0;
/// Spin and splash frames advance every 4 ticks.
pub const ANIM_STEP_TICKS: u64 = 4;
const DRIFT_STEP_Y: f32 = 10.0;
/// A splashed bottle lingers this long before it is removed.
pub const RETIRE_AFTER_MS: u64 = 300;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum BottleAnim {
    Spin,
    Splash,
}

impl Animated for BottleAnim {
    fn spec(&self) -> AnimationSpec {
        match self {
            BottleAnim::Spin => AnimationSpec::looping(0, 3, 4),
            BottleAnim::Splash => AnimationSpec::once(4, 9, 4),
        }
    }
}

pub struct ThrowableBottle {
    pub hitbox: Hitbox,
    pub dir: Dir,
    pub anim: AnimationPlayer<BottleAnim>,
    speed_y: f32,
    flight_ticks: u32,
    splash_since_ms: Option<u64>,
    /// Set once the splash has played out; the world drops spent bottles.
    pub spent: bool,
}

impl ThrowableBottle {
    pub fn new(x: f32, y: f32, dir: Dir) -> Self {
        ThrowableBottle {
            hitbox: Hitbox::new(
                x,
                y,
                100.0,
                100.0,
                Insets {
                    // Slightly widened so a bottle grazing the boss connects.
                    right: -8.0,
                    ..Insets::default()
                },
            ),
            dir,
            anim: AnimationPlayer::new(BottleAnim::Spin),
            speed_y: INITIAL_SPEED_Y,
            flight_ticks: 0,
            splash_since_ms: None,
            spent: false,
        }
    }

    /// A fresh bottle leaving the character's hand.
    pub fn thrown_from(character: &Hitbox, facing: Dir) -> Self {
        let x = match facing {
            Dir::Left => character.x - 20.0,
            Dir::Right => character.x + 40.0,
        };
        ThrowableBottle::new(x, character.y + 100.0, facing)
    }

    pub fn is_splashed(&self) -> bool {
        self.splash_since_ms.is_some()
    }

    fn is_above_ground(&self) -> bool {
        self.hitbox.y < AIRBORNE_BELOW_Y
    }

    pub fn update(
        &mut self,
        tick: u64,
        now_ms: u64,
        hit_boss_flag: bool,
        audio: &mut Vec<AudioEvent>,
    ) {
        match self.splash_since_ms {
            None => {
                if self.flight_ticks < FLIGHT_TICKS {
                    self.flight_ticks += 1;
                    match self.dir {
                        Dir::Left => self.hitbox.x -= HORIZONTAL_SPEED,
                        Dir::Right => self.hitbox.x += HORIZONTAL_SPEED,
                    }
                }
                if self.is_above_ground() || self.speed_y > 0.0 {
                    self.hitbox.y -= self.speed_y;
                    self.speed_y -= GRAVITY_DECAY;
                }
                // Sampled every tick: the boss-hit flag outlives the hit by
                // less than one spin step and must not slip between frames.
                if self.hitbox.y > SPLASH_GROUND_Y || hit_boss_flag {
                    self.splash_since_ms = Some(now_ms);
                    self.anim.set_state(BottleAnim::Splash);
                    audio.push(AudioEvent::Cue(SoundCue::Splash));
                } else if tick % ANIM_STEP_TICKS == 0 {
                    self.anim.advance(ANIM_STEP_TICKS as u32);
                }
            }
            Some(since) => {
                if tick % ANIM_STEP_TICKS == 0 {
                    self.hitbox.y += DRIFT_STEP_Y;
                    self.anim.advance(ANIM_STEP_TICKS as u32);
                }
                if now_ms >= since + RETIRE_AFTER_MS {
                    self.spent = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bottle: &mut ThrowableBottle, tick: &mut u64, ticks: u64, hit_flag: bool) {
        let mut audio = vec![];
        for _ in 0..ticks {
            *tick += 1;
            bottle.update(*tick, *tick * 1000 / 60, hit_flag, &mut audio);
        }
    }

    #[test]
    fn spawn_offsets_follow_facing() {
        let character = Hitbox::new(200.0, 105.0, 120.0, 330.0, Insets::default());
        let left = ThrowableBottle::thrown_from(&character, Dir::Left);
        assert_eq!((left.hitbox.x, left.hitbox.y), (180.0, 205.0));
        let right = ThrowableBottle::thrown_from(&character, Dir::Right);
        assert_eq!((right.hitbox.x, right.hitbox.y), (240.0, 205.0));
    }

    #[test]
    fn flies_then_splashes_then_retires() {
        let mut bottle = ThrowableBottle::new(500.0, 205.0, Dir::Right);
        let mut tick = 0;
        run(&mut bottle, &mut tick, 200, false);
        assert!(bottle.is_splashed());
        assert!(bottle.spent);
        // Horizontal motion stopped at the splash.
        assert!(bottle.hitbox.x < 500.0 + HORIZONTAL_SPEED * FLIGHT_TICKS as f32);
    }

    #[test]
    fn boss_hit_flag_forces_the_splash() {
        let mut bottle = ThrowableBottle::new(500.0, 205.0, Dir::Right);
        let mut tick = 0;
        // The flag is picked up on the very next update.
        run(&mut bottle, &mut tick, 1, true);
        assert!(bottle.is_splashed());
        assert!(!bottle.spent);
        // Retirement lands 300 ms after the splash (16 ms -> 316 ms, tick 19).
        run(&mut bottle, &mut tick, 17, false);
        assert!(!bottle.spent);
        run(&mut bottle, &mut tick, 1, false);
        assert!(bottle.spent);
    }
}
