use super::chicken::{Chicken, ChickenKind};
use super::collectable::{Collectable, CollectableKind};
use super::endboss::{self, Endboss};
use super::scenery::{BackgroundTile, Cloud, tile_background};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Entity counts and layout knobs for one level. Deserialized from
/// `assets/level1.json` when present, otherwise the built-in layout.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LevelConfig {
    pub chickens: u32,
    pub small_chickens: u32,
    pub coins: u32,
    pub bottles: u32,
    pub clouds: u32,
    pub background_tiles: u32,
    pub endboss_x: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig {
            chickens: 6,
            small_chickens: 4,
            coins: 8,
            bottles: 8,
            clouds: 5,
            background_tiles: 8,
            endboss_x: endboss::SPAWN_X,
        }
    }
}

#[derive(Error, Debug)]
pub enum LevelConfigError {
    #[error("could not read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse level file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LevelConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelConfigError> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Missing file is fine (built-in layout); a broken file is reported.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return LevelConfig::default();
        }
        match LevelConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, ?path, "falling back to the built-in level");
                LevelConfig::default()
            }
        }
    }
}

pub struct Level {
    pub enemies: Vec<Chicken>,
    pub endboss: Endboss,
    pub coins: Vec<Collectable>,
    pub bottles: Vec<Collectable>,
    pub clouds: Vec<Cloud>,
    pub background: Vec<BackgroundTile>,
    /// Right edge of the walkable area.
    pub end_x: f32,
}

impl Level {
    pub fn build(config: &LevelConfig, rng: &mut impl Rng) -> Self {
        let mut enemies = Vec::new();
        let mut next_id = 0;
        for _ in 0..config.chickens {
            enemies.push(Chicken::spawn(next_id, ChickenKind::Normal, rng));
            next_id += 1;
        }
        for _ in 0..config.small_chickens {
            enemies.push(Chicken::spawn(next_id, ChickenKind::Small, rng));
            next_id += 1;
        }

        let coins = (0..config.coins)
            .map(|_| Collectable::spawn(CollectableKind::Coin, rng))
            .collect();
        let bottles = (0..config.bottles)
            .map(|_| Collectable::spawn(CollectableKind::Bottle, rng))
            .collect();
        let clouds = (0..config.clouds).map(|_| Cloud::spawn(rng)).collect();

        tracing::info!(
            chickens = enemies.len(),
            coins = config.coins,
            bottles = config.bottles,
            endboss_x = config.endboss_x,
            "level built"
        );

        Level {
            enemies,
            endboss: Endboss::new(config.endboss_x),
            coins,
            bottles,
            clouds,
            background: tile_background(config.background_tiles),
            end_x: config.endboss_x,
        }
    }
}
