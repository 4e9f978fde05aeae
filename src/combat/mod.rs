//! Combat system module
//!
//! Converts classified rolls into HP changes:
//! - Player attack and defend resolution
//! - Enemy attacks scaled from the player's damage stat
//! - Enemy HP and victory rewards per round
//! - Per-round combat state

mod resolve;
mod state;

pub use resolve::{
    enemy_base_damage, enemy_hp, resolve_attack, resolve_defend, resolve_enemy_attack,
    VictoryRewards, POINT_HEAL_FACTOR, TRIPS_HEAL_FACTOR,
};
pub use state::{CombatState, Fighter};
