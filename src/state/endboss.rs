use super::animation::{Animated, AnimationPlayer, AnimationSpec};
use super::common::{Energy, Hitbox, Insets};
use super::session::Session;
use crate::sound_handler::{AudioEvent, MusicTrack, SoundCue};

pub const SPAWN_X: f32 = 3200.0;
pub const SPAWN_Y: f32 = 50.0;
pub const WALK_SPEED: f32 = 15.0;
/// Behavior and animation are re-evaluated every 8 ticks (130 ms).
pub const BEHAVIOR_STEP_TICKS: u64 = 8;
pub const ATTENTION_RANGE: f32 = 800.0;
pub const ATTACK_RANGE: f32 = 30.0;
/// Hurt pose lingers this long after a registered bottle hit.
pub const HURT_WINDOW_MS: u64 = 1300;
/// Delay between first noticing the character and engaging.
pub const ARRIVAL_DELAY_MS: u64 = 1500;
const SINK_DELAY_MS: u64 = 500;
const SINK_STEP_TICKS: u64 = 3;
const SINK_STEP_Y: f32 = 20.0;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum EndbossAnim {
    Attention,
    Walking,
    Attack,
    Hurt,
    Dead,
}

impl Animated for EndbossAnim {
    fn spec(&self) -> AnimationSpec {
        match self {
            EndbossAnim::Walking => AnimationSpec::looping(0, 3, 8),
            EndbossAnim::Attention => AnimationSpec::looping(4, 11, 8),
            EndbossAnim::Attack => AnimationSpec::looping(12, 19, 8),
            EndbossAnim::Hurt => AnimationSpec::looping(20, 22, 8),
            EndbossAnim::Dead => AnimationSpec::once(23, 25, 8),
        }
    }
}

pub struct Endboss {
    pub hitbox: Hitbox,
    pub energy: Energy,
    pub anim: AnimationPlayer<EndbossAnim>,
    arrival_deadline_ms: Option<u64>,
    sink_from_ms: Option<u64>,
    music_started: bool,
}

impl Endboss {
    pub fn new(spawn_x: f32) -> Self {
        Endboss {
            hitbox: Hitbox::new(
                spawn_x,
                SPAWN_Y,
                300.0,
                400.0,
                Insets {
                    top: 50.0,
                    bottom: 20.0,
                    left: 30.0,
                    right: 30.0,
                },
            ),
            energy: Energy::full(),
            anim: AnimationPlayer::new(EndbossAnim::Walking),
            arrival_deadline_ms: None,
            sink_from_ms: None,
            music_started: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.energy.is_dead()
    }

    pub fn is_hurt(&self, now_ms: u64) -> bool {
        self.energy.is_hurt(now_ms, HURT_WINDOW_MS)
    }

    fn noticing(&self, character_x: f32, session: &Session) -> bool {
        self.hitbox.x - character_x <= ATTENTION_RANGE && !session.arrived_endboss
    }

    pub fn update(
        &mut self,
        tick: u64,
        now_ms: u64,
        character_x: f32,
        session: &mut Session,
        audio: &mut Vec<AudioEvent>,
    ) {
        if let Some(deadline) = self.arrival_deadline_ms {
            if !session.arrived_endboss && now_ms >= deadline {
                session.arrived_endboss = true;
                tracing::debug!(x = self.hitbox.x, "endboss engaged");
            }
        }

        if let Some(from) = self.sink_from_ms {
            if now_ms >= from && tick % SINK_STEP_TICKS == 0 {
                self.hitbox.y += SINK_STEP_Y;
            }
        }

        if tick % BEHAVIOR_STEP_TICKS == 0 {
            self.behavior_step(now_ms, character_x, session, audio);
        }
    }

    fn behavior_step(
        &mut self,
        now_ms: u64,
        character_x: f32,
        session: &Session,
        audio: &mut Vec<AudioEvent>,
    ) {
        let next = if self.noticing(character_x, session) {
            if self.arrival_deadline_ms.is_none() {
                self.arrival_deadline_ms = Some(now_ms + ARRIVAL_DELAY_MS);
                audio.push(AudioEvent::Cue(SoundCue::BossAttention));
            }
            EndbossAnim::Attention
        } else if self.hitbox.x - character_x < ATTACK_RANGE {
            if *self.anim.state() != EndbossAnim::Attack {
                audio.push(AudioEvent::Cue(SoundCue::BossAttack));
            }
            EndbossAnim::Attack
        } else if self.is_hurt(now_ms) {
            if *self.anim.state() != EndbossAnim::Hurt {
                audio.push(AudioEvent::Cue(SoundCue::BossHurt));
            }
            EndbossAnim::Hurt
        } else if self.is_dead() {
            if self.sink_from_ms.is_none() {
                self.sink_from_ms = Some(now_ms + SINK_DELAY_MS);
                audio.push(AudioEvent::StopMusic);
                audio.push(AudioEvent::Cue(SoundCue::Win));
            }
            EndbossAnim::Dead
        } else if session.arrived_endboss {
            if !self.music_started {
                self.music_started = true;
                audio.push(AudioEvent::Music(MusicTrack::Boss));
            }
            self.hitbox.x -= WALK_SPEED;
            EndbossAnim::Walking
        } else {
            EndbossAnim::Walking
        };
        self.anim.set_state(next);
        self.anim.advance(BEHAVIOR_STEP_TICKS as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(boss: &mut Endboss, session: &mut Session, tick: &mut u64, ticks: u64, character_x: f32) {
        let mut audio = vec![];
        for _ in 0..ticks {
            *tick += 1;
            boss.update(*tick, *tick * 1000 / 60, character_x, session, &mut audio);
        }
    }

    #[test]
    fn no_attention_at_spawn_distance() {
        let mut boss = Endboss::new(SPAWN_X);
        let mut session = Session::new();
        let mut tick = 0;
        run(&mut boss, &mut session, &mut tick, 16, 0.0);
        assert_eq!(*boss.anim.state(), EndbossAnim::Walking);
        assert!(!session.arrived_endboss);
    }

    #[test]
    fn attention_then_arrival_after_delay() {
        let mut boss = Endboss::new(SPAWN_X);
        let mut session = Session::new();
        let mut tick = 0;
        // Character parked 750 px away.
        let character_x = SPAWN_X - 750.0;
        run(&mut boss, &mut session, &mut tick, 8, character_x);
        assert_eq!(*boss.anim.state(), EndbossAnim::Attention);
        assert!(!session.arrived_endboss);
        // First attention step was tick 8 (133 ms); the 1500 ms delay runs
        // out at 1633 ms, which tick 98 is the first to reach.
        run(&mut boss, &mut session, &mut tick, 89, character_x);
        assert!(!session.arrived_endboss);
        run(&mut boss, &mut session, &mut tick, 1, character_x);
        assert!(session.arrived_endboss);
        // Next behavior step switches to the walk-in.
        run(&mut boss, &mut session, &mut tick, 6, character_x);
        assert_eq!(*boss.anim.state(), EndbossAnim::Walking);
    }

    #[test]
    fn arrival_never_reverts() {
        let mut boss = Endboss::new(SPAWN_X);
        let mut session = Session::new();
        let mut tick = 0;
        let character_x = SPAWN_X - 750.0;
        run(&mut boss, &mut session, &mut tick, 120, character_x);
        assert!(session.arrived_endboss);
        // Character retreating far away does not reset the flag.
        run(&mut boss, &mut session, &mut tick, 120, 0.0);
        assert!(session.arrived_endboss);
    }

    #[test]
    fn walking_closes_in_once_arrived() {
        let mut boss = Endboss::new(SPAWN_X);
        let mut session = Session::new();
        session.arrived_endboss = true;
        let x = boss.hitbox.x;
        let mut tick = 0;
        run(&mut boss, &mut session, &mut tick, 8, 0.0);
        assert_eq!(boss.hitbox.x, x - WALK_SPEED);
    }
}
