//! Engine configuration
//!
//! Starting stats and run tuning. Values are layered: built-in defaults,
//! then an optional TOML file, then `CEELO_`-prefixed environment variables.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Gold a fresh run starts with
pub const STARTING_GOLD: u64 = 20;

/// Player HP a fresh run starts with
pub const STARTING_HP: i32 = 50;

/// Player damage a fresh run starts with
pub const STARTING_DAMAGE: u32 = 5;

/// Manual rerolls granted each round before powerup bonuses
pub const STARTING_REROLLS: u32 = 1;

/// Rounds in a full run
pub const MAX_ROUNDS: u32 = 5;

/// Enemies hit with this fraction of the player's base damage
pub const ENEMY_DAMAGE_MULTIPLIER: f64 = 0.8;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub starting_gold: u64,
    pub starting_hp: i32,
    pub starting_damage: u32,
    pub starting_rerolls: u32,
    pub max_rounds: u32,
    pub enemy_damage_multiplier: f64,
    /// Fixed seed for reproducible runs; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_gold: STARTING_GOLD,
            starting_hp: STARTING_HP,
            starting_damage: STARTING_DAMAGE,
            starting_rerolls: STARTING_REROLLS,
            max_rounds: MAX_ROUNDS,
            enemy_damage_multiplier: ENEMY_DAMAGE_MULTIPLIER,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from defaults, an optional TOML file, and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config: Self = figment.merge(Env::prefixed("CEELO_")).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Set a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_rounds == 0 {
            return Err(EngineError::Config("max_rounds must be at least 1".into()));
        }
        if self.starting_hp <= 0 {
            return Err(EngineError::Config("starting_hp must be positive".into()));
        }
        if self.starting_damage == 0 {
            return Err(EngineError::Config("starting_damage must be positive".into()));
        }
        if !self.enemy_damage_multiplier.is_finite() || self.enemy_damage_multiplier < 0.0 {
            return Err(EngineError::Config(format!(
                "enemy_damage_multiplier must be a non-negative number, got {}",
                self.enemy_damage_multiplier
            )));
        }
        Ok(())
    }
}
