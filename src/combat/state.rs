//! Per-round combat state
//!
//! Created when a round begins and discarded when it resolves.

use serde::{Deserialize, Serialize};

use crate::dice::RollResult;

/// One side's hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub hp: i32,
    pub max_hp: i32,
}

impl Fighter {
    pub fn new(max_hp: i32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Take damage, clamping at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> i32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount).max(0);
        before - self.hp
    }

    /// Heal. Max HP is the round's starting HP, not a cap.
    pub fn heal(&mut self, amount: u32) -> i32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.hp = self.hp.saturating_add(amount);
        amount
    }
}

/// Combat state for the round in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub enemy: Fighter,
    pub player: Fighter,
    /// Manual rerolls left this round
    pub rerolls_left: u32,
    /// Ace saver already spent this round
    pub used_ace_saver: bool,
    pub wild_die_uses_left: u32,
    /// Player acted first this round
    pub player_first: bool,
    /// Player roll awaiting an action
    pub pending_roll: Option<RollResult>,
    /// Most recent enemy roll, for display
    pub last_enemy_roll: Option<RollResult>,
}

impl CombatState {
    pub fn new(
        enemy_hp: i32,
        player_hp: i32,
        rerolls: u32,
        wild_die_uses: u32,
        player_first: bool,
    ) -> Self {
        Self {
            enemy: Fighter::new(enemy_hp),
            player: Fighter::new(player_hp),
            rerolls_left: rerolls,
            used_ace_saver: false,
            wild_die_uses_left: wild_die_uses,
            player_first,
            pending_roll: None,
            last_enemy_roll: None,
        }
    }
}
