//! Run state
//!
//! The per-run record that the economy and round outcomes mutate. Created
//! when a run starts, replaced wholesale on restart.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::economy::{PowerupKey, Powerups, PriceTable};

/// Persistent player progress for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub gold: u64,
    /// Player HP at the start of every round
    pub base_hp: i32,
    pub base_damage: u32,
    /// Current round, starting at 1
    pub round: u32,
    pub max_rounds: u32,
    /// Manual rerolls per round before Extra Reroll levels
    pub rerolls_base: u32,
    pub powerups: Powerups,
    pub prices: PriceTable,
    /// Purchases made this run; drives global inflation
    pub purchase_count: u32,
}

impl RunState {
    /// Fresh run from configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            gold: config.starting_gold,
            base_hp: config.starting_hp,
            base_damage: config.starting_damage,
            round: 1,
            max_rounds: config.max_rounds,
            rerolls_base: config.starting_rerolls,
            powerups: Powerups::new(),
            prices: PriceTable::new(),
            purchase_count: 0,
        }
    }

    /// Manual rerolls available at round start
    pub fn rerolls_per_round(&self) -> u32 {
        self.rerolls_base + self.powerups.count(PowerupKey::ExtraReroll)
    }

    /// Wild die uses available at round start
    pub fn wild_die_uses(&self) -> u32 {
        self.powerups.count(PowerupKey::WildDie)
    }

    /// Whether the run has cleared every round
    pub fn is_complete(&self) -> bool {
        self.round > self.max_rounds
    }

    /// Add gold (round rewards)
    pub fn grant_gold(&mut self, amount: u64, reason: &str) {
        let before = self.gold;
        self.gold = self.gold.saturating_add(amount);
        debug!("Granted {} gold: {} -> {} ({})", amount, before, self.gold, reason);
    }
}
