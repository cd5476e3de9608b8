use super::animation::{Animated, AnimationPlayer, AnimationSpec};
use super::common::{Dir, Energy, Hitbox, Insets};
use super::world::InputState;
use crate::sound_handler::{AudioEvent, SoundCue};

pub const GROUND_Y: f32 = 105.0;
pub const WALK_SPEED: f32 = 8.0;
pub const JUMP_IMPULSE: f32 = 30.0;
pub const GRAVITY_DECAY: f32 = 2.5;
/// Contact hits inside this window after the last registered hit are dropped.
pub const HURT_GRACE_MS: u64 = 500;
/// Animation state is re-evaluated every 6 ticks (100 ms).
pub const ANIM_STEP_TICKS: u64 = 6;
/// Idle animation steps before the long-idle pose kicks in.
const LONG_IDLE_AFTER_STEPS: u32 = 30;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CharacterAnim {
    Idle,
    LongIdle,
    Walking,
    Jumping,
    Hurt,
    Dead,
}

impl Animated for CharacterAnim {
    fn spec(&self) -> AnimationSpec {
        match self {
            CharacterAnim::Walking => AnimationSpec::looping(0, 5, 6),
            CharacterAnim::Jumping => AnimationSpec::looping(6, 14, 6),
            CharacterAnim::Dead => AnimationSpec::once(15, 21, 6),
            CharacterAnim::Hurt => AnimationSpec::looping(22, 24, 6),
            CharacterAnim::Idle => AnimationSpec::looping(25, 34, 12),
            CharacterAnim::LongIdle => AnimationSpec::looping(35, 44, 6),
        }
    }
}

pub struct Character {
    pub hitbox: Hitbox,
    pub energy: Energy,
    pub speed_y: f32,
    pub facing: Dir,
    pub anim: AnimationPlayer<CharacterAnim>,
    idle_steps: u32,
}

impl Character {
    pub fn new() -> Self {
        Character {
            hitbox: Hitbox::new(
                120.0,
                GROUND_Y,
                120.0,
                330.0,
                Insets {
                    top: 120.0,
                    bottom: 20.0,
                    left: 15.0,
                    right: 15.0,
                },
            ),
            energy: Energy::full(),
            speed_y: 0.0,
            facing: Dir::Right,
            anim: AnimationPlayer::new(CharacterAnim::Idle),
            idle_steps: 0,
        }
    }

    pub fn is_above_ground(&self) -> bool {
        self.hitbox.y < GROUND_Y
    }

    pub fn is_dead(&self) -> bool {
        self.energy.is_dead()
    }

    pub fn is_hurt(&self, now_ms: u64) -> bool {
        self.energy.is_hurt(now_ms, HURT_GRACE_MS)
    }

    /// Upward kick after squashing a chicken.
    pub fn bounce(&mut self) {
        self.speed_y = JUMP_IMPULSE;
    }

    /// Standard contact damage (-0.5). Dropped while the hurt grace is
    /// active, so a chicken standing inside the character lands one hit per
    /// grace window rather than one per tick.
    pub fn take_contact_hit(&mut self, now_ms: u64) {
        if self.is_hurt(now_ms) {
            return;
        }
        self.energy.hit(0.5, now_ms);
    }

    pub fn take_boss_hit(&mut self, now_ms: u64) {
        self.energy.hit(19.0, now_ms);
    }

    /// `right_bound` is the level end, or the boss's position once the boss
    /// has been engaged.
    pub fn update(
        &mut self,
        tick: u64,
        now_ms: u64,
        input: &InputState,
        right_bound: f32,
        audio: &mut Vec<AudioEvent>,
    ) {
        if !self.is_dead() {
            self.apply_input(input, right_bound);
        }
        self.apply_gravity();
        if tick % ANIM_STEP_TICKS == 0 {
            self.animation_step(now_ms, input, audio);
        }
    }

    fn apply_input(&mut self, input: &InputState, right_bound: f32) {
        if input.right && self.hitbox.x < right_bound {
            self.hitbox.x += WALK_SPEED;
            self.facing = Dir::Right;
        }
        if input.left && self.hitbox.x > 0.0 {
            self.hitbox.x -= WALK_SPEED;
            self.facing = Dir::Left;
        }
        if input.jump && !self.is_above_ground() {
            self.speed_y = JUMP_IMPULSE;
        }
    }

    fn apply_gravity(&mut self) {
        if self.is_above_ground() || self.speed_y > 0.0 {
            self.hitbox.y -= self.speed_y;
            self.speed_y -= GRAVITY_DECAY;
        } else {
            // Snap back to the ground plane after the arc overshoots.
            self.hitbox.y = GROUND_Y;
        }
    }

    fn animation_step(&mut self, now_ms: u64, input: &InputState, audio: &mut Vec<AudioEvent>) {
        let next = if self.is_dead() {
            CharacterAnim::Dead
        } else if self.is_hurt(now_ms) {
            self.idle_steps = 0;
            CharacterAnim::Hurt
        } else if self.is_above_ground() {
            self.idle_steps = 0;
            CharacterAnim::Jumping
        } else if input.left || input.right {
            self.idle_steps = 0;
            CharacterAnim::Walking
        } else if self.idle_steps < LONG_IDLE_AFTER_STEPS {
            self.idle_steps += 1;
            CharacterAnim::Idle
        } else {
            CharacterAnim::LongIdle
        };
        if next == CharacterAnim::Jumping && *self.anim.state() != CharacterAnim::Jumping {
            audio.push(AudioEvent::Cue(SoundCue::Jump));
        }
        if next == CharacterAnim::Hurt && *self.anim.state() != CharacterAnim::Hurt {
            audio.push(AudioEvent::Cue(SoundCue::CharacterHurt));
        }
        self.anim.set_state(next);
        self.anim.advance(ANIM_STEP_TICKS as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_anim(character: &mut Character, steps: u32, input: &InputState) {
        let mut audio = vec![];
        for i in 0..steps as u64 {
            character.update(
                (i + 1) * ANIM_STEP_TICKS,
                (i + 1) * 100,
                input,
                10_000.0,
                &mut audio,
            );
        }
    }

    #[test]
    fn long_idle_after_thirty_idle_steps() {
        let mut character = Character::new();
        let input = InputState::default();
        step_anim(&mut character, 30, &input);
        assert_eq!(*character.anim.state(), CharacterAnim::Idle);
        step_anim(&mut character, 1, &input);
        assert_eq!(*character.anim.state(), CharacterAnim::LongIdle);
    }

    #[test]
    fn walking_resets_the_idle_counter() {
        let mut character = Character::new();
        step_anim(&mut character, 25, &InputState::default());
        step_anim(
            &mut character,
            1,
            &InputState {
                right: true,
                ..InputState::default()
            },
        );
        assert_eq!(*character.anim.state(), CharacterAnim::Walking);
        step_anim(&mut character, 30, &InputState::default());
        assert_eq!(*character.anim.state(), CharacterAnim::Idle);
    }

    #[test]
    fn spaced_contact_hits_accumulate() {
        let mut character = Character::new();
        for i in 0..6u64 {
            character.take_contact_hit(1000 + i * HURT_GRACE_MS);
        }
        assert_eq!(character.energy.value, 97.0);
    }

    #[test]
    fn hits_inside_the_grace_window_collapse() {
        let mut character = Character::new();
        for _ in 0..6 {
            character.take_contact_hit(1000);
        }
        assert_eq!(character.energy.value, 99.5);
    }

    #[test]
    fn jump_arc_returns_to_ground() {
        let mut character = Character::new();
        let mut audio = vec![];
        let input = InputState {
            jump: true,
            ..InputState::default()
        };
        character.update(1, 16, &input, 10_000.0, &mut audio);
        assert!(character.is_above_ground());
        let idle = InputState::default();
        for t in 2..200u64 {
            character.update(t, t * 16, &idle, 10_000.0, &mut audio);
        }
        assert!(!character.is_above_ground());
        assert_eq!(character.hitbox.y, GROUND_Y);
    }

    #[test]
    fn right_movement_stops_at_the_bound() {
        let mut character = Character::new();
        character.hitbox.x = 500.0;
        let mut audio = vec![];
        let input = InputState {
            right: true,
            ..InputState::default()
        };
        character.update(1, 16, &input, 500.0, &mut audio);
        assert_eq!(character.hitbox.x, 500.0);
        character.update(2, 33, &input, 3200.0, &mut audio);
        assert_eq!(character.hitbox.x, 508.0);
    }
}
