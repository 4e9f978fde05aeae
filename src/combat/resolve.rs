//! Damage, healing, enemy scaling, and round rewards
//!
//! - Attack: base damage × roll value (trips doubled by Double Down)
//! - Defend: trips heal 5× value, points heal 3× value
//! - Enemy: hits with a fixed fraction of the player's base damage

use serde::{Deserialize, Serialize};

use crate::dice::{RollKind, RollResult};

/// Heal per trips value point
pub const TRIPS_HEAL_FACTOR: u32 = 5;

/// Heal per point value point
pub const POINT_HEAL_FACTOR: u32 = 3;

/// Player damage for a roll. Non-scoring rolls deal nothing.
pub fn resolve_attack(roll: &RollResult, base_damage: u32, double_down: bool) -> u32 {
    match roll.kind {
        RollKind::Trips => {
            let multiplier = if double_down { 2 } else { 1 };
            base_damage * roll.value * multiplier
        }
        RollKind::Point => base_damage * roll.value,
        _ => 0,
    }
}

/// Healing for a defended roll. Non-scoring rolls heal nothing.
pub fn resolve_defend(roll: &RollResult) -> u32 {
    match roll.kind {
        RollKind::Trips => roll.value * TRIPS_HEAL_FACTOR,
        RollKind::Point => roll.value * POINT_HEAL_FACTOR,
        _ => 0,
    }
}

/// Enemy base damage derived from the player's damage stat
pub fn enemy_base_damage(player_base_damage: u32, multiplier: f64) -> u32 {
    (f64::from(player_base_damage) * multiplier).floor() as u32
}

/// Enemy damage for a roll, never doubled
pub fn resolve_enemy_attack(roll: &RollResult, player_base_damage: u32, multiplier: f64) -> u32 {
    resolve_attack(roll, enemy_base_damage(player_base_damage, multiplier), false)
}

/// Enemy HP for a round.
///
/// `(15 + 5r) + 2r² + floor((player_hp - starting_hp) / 2)`
pub fn enemy_hp(round: u32, player_base_hp: i32, starting_hp: i32) -> i32 {
    let round = round as i32;
    let base = 15 + round * 5;
    let round_scaling = round * round * 2;
    let player_scaling = (player_base_hp - starting_hp).div_euclid(2);
    base + round_scaling + player_scaling
}

/// Rewards for clearing a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryRewards {
    pub gold: u64,
    pub hp: i32,
    pub damage: u32,
}

impl VictoryRewards {
    pub fn for_round(round: u32) -> Self {
        Self {
            gold: 15 + u64::from(round) * 5,
            hp: 3 + (round / 2) as i32,
            damage: 2 + round / 2,
        }
    }
}
