use canyon_run::sound_handler::{AudioEvent, SoundCue};
use canyon_run::state::session::Outcome;
use canyon_run::state::throwable::ThrowableBottle;
use canyon_run::state::{Dir, InputState, LevelConfig, World};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn world() -> World {
    let mut rng = StdRng::seed_from_u64(42);
    World::with_rng(&LevelConfig::default(), &mut rng)
}

/// Runs `ticks` steps and collects every audio event the shell would drain.
fn run(world: &mut World, ticks: u64, input: &InputState) -> Vec<AudioEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        world.tick(input);
        events.extend(world.drain_audio());
    }
    events
}

#[test]
fn stomp_kill_removes_the_chicken_after_a_linger() {
    let mut w = world();
    w.level.enemies.truncate(1);
    let chicken_id = w.level.enemies[0].id;
    w.level.enemies[0].hitbox.x = 300.0;

    // Airborne character falling onto the chicken.
    w.character.hitbox.x = 300.0;
    w.character.hitbox.y = 80.0;

    let input = InputState::default();
    let events = run(&mut w, 1, &input);

    assert!(w.level.enemies[0].is_dead());
    assert!(events.contains(&AudioEvent::Cue(SoundCue::ChickenDead)));
    // The stomp bounces the character back up.
    assert_eq!(w.character.speed_y, 30.0);
    assert_eq!(w.session.stats.chickens_killed, 0);

    // The corpse lingers for 500 ms (kill registered at 16 ms).
    run(&mut w, 29, &input);
    assert_eq!(w.level.enemies.len(), 1);
    assert_eq!(w.level.enemies[0].id, chicken_id);

    run(&mut w, 1, &input);
    assert!(w.level.enemies.is_empty());
    assert_eq!(w.session.stats.chickens_killed, 1);
}

#[test]
fn boss_shield_blocks_bottles_for_1500_ms() {
    let mut w = world();
    w.level.endboss.hitbox.x = 1000.0;
    let input = InputState::default();

    // Keep a fresh bottle parked inside the boss every tick.
    for _ in 0..90 {
        w.throwables.clear();
        w.throwables.push(ThrowableBottle::new(1050.0, 150.0, Dir::Right));
        run(&mut w, 1, &input);
    }
    // One hit landed at 16 ms; the shield holds through 1515 ms.
    assert_eq!(w.level.endboss.energy.value, 81.0);

    w.throwables.clear();
    w.throwables.push(ThrowableBottle::new(1050.0, 150.0, Dir::Right));
    run(&mut w, 1, &input);
    assert_eq!(w.level.endboss.energy.value, 62.0);
}

#[test]
fn bottles_splash_on_the_boss_whatever_tick_they_hit() {
    // The boss-hit marker only outlives the hit by two ticks, so cover every
    // alignment of the hit against the spin cadence.
    for lead in 0..4u64 {
        let mut w = world();
        w.level.endboss.hitbox.x = 1000.0;
        let input = InputState::default();

        run(&mut w, lead, &input);
        w.throwables.push(ThrowableBottle::new(1050.0, 150.0, Dir::Right));
        run(&mut w, 1, &input);
        assert_eq!(w.level.endboss.energy.value, 81.0, "hit on tick {}", lead + 1);

        let events = run(&mut w, 2, &input);
        assert!(
            w.throwables[0].is_splashed(),
            "bottle flew on after hitting the boss on tick {}",
            lead + 1
        );
        assert!(events.contains(&AudioEvent::Cue(SoundCue::Splash)));
    }
}

#[test]
fn throwing_spends_banked_bottles() {
    let mut w = world();
    // No stray pickups feeding the inventory mid-test.
    w.level.coins.clear();
    w.level.bottles.clear();
    let input = InputState {
        throw: true,
        ..InputState::default()
    };

    // Nothing banked, nothing thrown.
    run(&mut w, 12, &input);
    assert!(w.throwables.is_empty());
    assert_eq!(w.session.stats.bottles_thrown, 0);

    w.bottles_banked = 2;
    run(&mut w, 12, &input);
    assert_eq!(w.session.stats.bottles_thrown, 1);
    assert_eq!(w.bottles_banked, 1);
    assert_eq!(w.status_bottles.step, 1);

    run(&mut w, 12, &input);
    assert_eq!(w.session.stats.bottles_thrown, 2);
    assert_eq!(w.bottles_banked, 0);

    // Empty again: holding the key does nothing.
    run(&mut w, 24, &input);
    assert_eq!(w.session.stats.bottles_thrown, 2);
}

#[test]
fn pickups_update_stats_and_bars() {
    let mut w = world();
    w.level.coins.truncate(1);
    w.level.bottles.truncate(1);
    w.level.coins[0].hitbox.x = 120.0;
    w.level.coins[0].hitbox.y = 100.0;
    w.level.bottles[0].hitbox.x = 130.0;
    // Keep the chickens clear of the pickup spot.
    for chicken in &mut w.level.enemies {
        chicken.hitbox.x = 5000.0;
    }

    let events = run(&mut w, 1, &InputState::default());

    assert!(w.level.coins.is_empty());
    assert!(w.level.bottles.is_empty());
    assert_eq!(w.session.stats.coins_collected, 1);
    assert_eq!(w.session.stats.bottles_collected, 1);
    assert_eq!(w.bottles_banked, 1);
    assert_eq!(w.status_coins.step, 1);
    assert_eq!(w.status_bottles.step, 1);
    assert!(events.contains(&AudioEvent::Cue(SoundCue::CollectCoin)));
    assert!(events.contains(&AudioEvent::Cue(SoundCue::CollectBottle)));
}

#[test]
fn character_death_stops_the_session_after_700_ms() {
    let mut w = world();
    w.character.energy.kill();

    let input = InputState::default();
    let events = run(&mut w, 1, &input);
    assert_eq!(w.session.outcome, Some(Outcome::Lost));
    assert!(!w.session.stopped);
    assert!(events.contains(&AudioEvent::Cue(SoundCue::CharacterDead)));
    assert!(events.contains(&AudioEvent::StopMusic));

    // Death registered at 16 ms, freeze lands at 716 ms (tick 43).
    run(&mut w, 41, &input);
    assert!(!w.session.stopped);
    run(&mut w, 1, &input);
    assert!(w.session.stopped);

    // A stopped world is frozen.
    let x = w.character.hitbox.x;
    run(&mut w, 10, &InputState {
        right: true,
        ..InputState::default()
    });
    assert_eq!(w.character.hitbox.x, x);
}

#[test]
fn boss_death_wins_the_session_after_1500_ms() {
    let mut w = world();
    w.level.endboss.energy.kill();

    let input = InputState::default();
    let mut events = run(&mut w, 1, &input);
    assert_eq!(w.session.outcome, Some(Outcome::Won));

    // Boss death registered at 16 ms, freeze lands at 1516 ms (tick 91).
    events.extend(run(&mut w, 89, &input));
    assert!(!w.session.stopped);
    events.extend(run(&mut w, 1, &input));
    assert!(w.session.stopped);

    assert!(events.contains(&AudioEvent::Cue(SoundCue::Win)));
    // The carcass sinks out of the frame.
    assert!(w.level.endboss.hitbox.y > 50.0);
}

#[test]
fn boss_engages_1500_ms_after_noticing() {
    let mut w = world();
    w.character.hitbox.x = w.level.endboss.hitbox.x - 750.0;
    // Keep the chickens from interfering with the parked character.
    for chicken in &mut w.level.enemies {
        chicken.hitbox.x = 0.0;
        chicken.speed = 0.0;
    }

    let input = InputState::default();
    run(&mut w, 97, &input);
    assert!(!w.session.arrived_endboss);
    run(&mut w, 1, &input);
    assert!(w.session.arrived_endboss);
}
