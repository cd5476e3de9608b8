use super::character::Character;
use super::common::ticks_to_ms;
use super::level::{Level, LevelConfig};
use super::session::{Outcome, Session};
use super::status_bar::StatusBar;
use super::throwable::ThrowableBottle;
use crate::camera::Camera;
use crate::sound_handler::{AudioEvent, MusicTrack, SoundCue};
use rand::Rng;

/// Throw input is sampled every 12 ticks (200 ms), so holding the key does
/// not empty the inventory in a single burst.
pub const THROW_POLL_TICKS: u64 = 12;
pub const CHARACTER_SHIELD_MS: u64 = 1500;
pub const BOSS_SHIELD_MS: u64 = 1500;
/// Transient marker a bottle consults to splash against the boss mid-air.
const BOSS_HIT_FLAG_MS: u64 = 50;
/// Dead chickens linger as corpses before being removed.
pub const CORPSE_LINGER_MS: u64 = 500;
pub const LOSE_STOP_DELAY_MS: u64 = 700;
pub const WIN_STOP_DELAY_MS: u64 = 1500;

/// Logical key state sampled by the shell once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub throw: bool,
}

struct PendingKill {
    id: u32,
    at_ms: u64,
}

pub struct World {
    pub character: Character,
    pub level: Level,
    pub throwables: Vec<ThrowableBottle>,
    /// Bottles picked up and not yet thrown.
    pub bottles_banked: u32,
    pub status_health: StatusBar,
    pub status_bottles: StatusBar,
    pub status_coins: StatusBar,
    pub status_boss: StatusBar,
    pub camera: Camera,
    pub session: Session,
    /// Cue/music requests for the shell to drain after each tick.
    pub audio: Vec<AudioEvent>,
    tick: u64,
    character_shield_until_ms: u64,
    boss_shield_until_ms: u64,
    bottle_hit_boss_until_ms: u64,
    pending_kills: Vec<PendingKill>,
}

impl World {
    pub fn new(config: &LevelConfig) -> Self {
        World::with_rng(config, &mut rand::rng())
    }

    pub fn with_rng(config: &LevelConfig, rng: &mut impl Rng) -> Self {
        World {
            character: Character::new(),
            level: Level::build(config, rng),
            throwables: Vec::new(),
            bottles_banked: 0,
            status_health: StatusBar::new(0.0, 0.0, 5),
            status_bottles: StatusBar::new(0.0, 55.0, 0),
            status_coins: StatusBar::new(0.0, 110.0, 0),
            status_boss: StatusBar::new(565.0, 30.0, 5),
            camera: Camera::new(),
            session: Session::new(),
            audio: vec![AudioEvent::Music(MusicTrack::Background)],
            tick: 0,
            character_shield_until_ms: 0,
            boss_shield_until_ms: 0,
            bottle_hit_boss_until_ms: 0,
            pending_kills: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        ticks_to_ms(self.tick)
    }

    /// One 60 Hz simulation step. Movement first, then collisions and the
    /// slower-cadence actions, then removals and the end-of-session checks.
    pub fn tick(&mut self, input: &InputState) {
        if self.session.stopped {
            return;
        }
        self.tick += 1;
        let tick = self.tick;
        let now = ticks_to_ms(tick);

        // The arena is capped at the boss once it has been engaged.
        let right_bound = if self.session.arrived_endboss {
            self.level.endboss.hitbox.x
        } else {
            self.level.end_x
        };
        self.character
            .update(tick, now, input, right_bound, &mut self.audio);

        for cloud in &mut self.level.clouds {
            cloud.update();
        }
        for chicken in &mut self.level.enemies {
            chicken.update(tick);
        }
        let character_x = self.character.hitbox.x;
        self.level
            .endboss
            .update(tick, now, character_x, &mut self.session, &mut self.audio);
        for item in self
            .level
            .coins
            .iter_mut()
            .chain(self.level.bottles.iter_mut())
        {
            item.update(tick);
        }
        let hit_boss_flag = now < self.bottle_hit_boss_until_ms;
        for bottle in &mut self.throwables {
            bottle.update(tick, now, hit_boss_flag, &mut self.audio);
        }

        self.check_chicken_contacts(now);
        self.check_boss_contact(now);
        self.check_bottles_vs_boss(now);
        self.check_bottles_vs_chickens(now);
        self.check_pickups();
        if tick % THROW_POLL_TICKS == 0 {
            self.check_throw(input);
        }

        self.remove_due_corpses(now);
        self.throwables.retain(|b| !b.spent);
        self.status_boss.set_percent(self.level.endboss.energy.value);
        self.resolve_outcome(now);

        self.camera.follow(self.character.hitbox.x);
        self.session.tick(now);
    }

    /// Stomps kill, walking contact hurts. A corpse still deals contact
    /// damage until its removal lands.
    fn check_chicken_contacts(&mut self, now: u64) {
        let stomping = self.character.is_above_ground() && !self.character.is_hurt(now);
        for chicken in &mut self.level.enemies {
            if !self.character.hitbox.overlaps(&chicken.hitbox) {
                continue;
            }
            if stomping {
                if !chicken.is_dead() {
                    chicken.kill();
                    self.audio.push(AudioEvent::Cue(SoundCue::ChickenDead));
                    self.pending_kills.push(PendingKill {
                        id: chicken.id,
                        at_ms: now + CORPSE_LINGER_MS,
                    });
                    self.character.bounce();
                }
            } else {
                self.character.take_contact_hit(now);
                self.status_health.set_percent(self.character.energy.value);
            }
        }
    }

    fn check_boss_contact(&mut self, now: u64) {
        if self.level.endboss.is_dead() {
            return;
        }
        if self.character.hitbox.overlaps(&self.level.endboss.hitbox)
            && now >= self.character_shield_until_ms
        {
            self.character.take_boss_hit(now);
            self.character_shield_until_ms = now + CHARACTER_SHIELD_MS;
            self.status_health.set_percent(self.character.energy.value);
        }
    }

    fn check_bottles_vs_boss(&mut self, now: u64) {
        for bottle in &self.throwables {
            if bottle.is_splashed() {
                continue;
            }
            if bottle.hitbox.overlaps(&self.level.endboss.hitbox)
                && now >= self.boss_shield_until_ms
            {
                self.level.endboss.energy.hit_by_bottle(19.0, now);
                self.boss_shield_until_ms = now + BOSS_SHIELD_MS;
                self.bottle_hit_boss_until_ms = now + BOSS_HIT_FLAG_MS;
            }
        }
    }

    fn check_bottles_vs_chickens(&mut self, now: u64) {
        for bottle in &self.throwables {
            if bottle.is_splashed() {
                continue;
            }
            for chicken in &mut self.level.enemies {
                if chicken.is_dead() || !bottle.hitbox.overlaps(&chicken.hitbox) {
                    continue;
                }
                chicken.kill();
                self.audio.push(AudioEvent::Cue(SoundCue::ChickenDead));
                self.pending_kills.push(PendingKill {
                    id: chicken.id,
                    at_ms: now + CORPSE_LINGER_MS,
                });
            }
        }
    }

    fn check_pickups(&mut self) {
        let mut i = 0;
        while i < self.level.coins.len() {
            if self.character.hitbox.overlaps(&self.level.coins[i].hitbox) {
                self.level.coins.remove(i);
                self.session.stats.coins_collected += 1;
                self.status_coins
                    .set_collected(self.session.stats.coins_collected);
                self.audio.push(AudioEvent::Cue(SoundCue::CollectCoin));
            } else {
                i += 1;
            }
        }
        let mut i = 0;
        while i < self.level.bottles.len() {
            if self.character.hitbox.overlaps(&self.level.bottles[i].hitbox) {
                self.level.bottles.remove(i);
                self.bottles_banked += 1;
                self.session.stats.bottles_collected += 1;
                self.status_bottles.set_collected(self.bottles_banked);
                self.audio.push(AudioEvent::Cue(SoundCue::CollectBottle));
            } else {
                i += 1;
            }
        }
    }

    fn check_throw(&mut self, input: &InputState) {
        if !input.throw || self.bottles_banked == 0 || self.character.is_dead() {
            return;
        }
        self.throwables.push(ThrowableBottle::thrown_from(
            &self.character.hitbox,
            self.character.facing,
        ));
        self.bottles_banked -= 1;
        self.session.stats.bottles_thrown += 1;
        self.status_bottles.set_collected(self.bottles_banked);
        self.audio.push(AudioEvent::Cue(SoundCue::Throw));
    }

    /// Removal is idempotent: a kill whose chicken is already gone is
    /// silently dropped.
    fn remove_due_corpses(&mut self, now: u64) {
        let mut i = 0;
        while i < self.pending_kills.len() {
            if now >= self.pending_kills[i].at_ms {
                let id = self.pending_kills[i].id;
                if let Some(pos) = self.level.enemies.iter().position(|e| e.id == id) {
                    self.level.enemies.remove(pos);
                    self.session.stats.chickens_killed += 1;
                }
                self.pending_kills.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn resolve_outcome(&mut self, now: u64) {
        if self.session.outcome.is_some() {
            return;
        }
        if self.character.is_dead() {
            self.audio.push(AudioEvent::StopMusic);
            self.audio.push(AudioEvent::Cue(SoundCue::CharacterDead));
            self.audio.push(AudioEvent::Cue(SoundCue::Lose));
            self.session.finish(Outcome::Lost, now, LOSE_STOP_DELAY_MS);
        } else if self.level.endboss.is_dead() {
            // The boss behavior already queued the jingle and music stop.
            self.session.finish(Outcome::Won, now, WIN_STOP_DELAY_MS);
        }
    }

    pub fn drain_audio(&mut self) -> std::vec::Drain<'_, AudioEvent> {
        self.audio.drain(..)
    }
}
