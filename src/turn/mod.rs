//! Turn sequencing
//!
//! - `Phase`: where the engine is in a run
//! - `TurnOrder`: who acts first each round
//! - Enemy turns, player rolls, and player actions as synchronous transitions
//! - Round victory and defeat bookkeeping

mod controller;
mod phase;

pub use controller::{
    apply_enemy_turn, apply_player_action, apply_player_roll, apply_round_defeat,
    apply_round_victory, PlayerAction, RoundOutcome,
};
pub use phase::{Phase, TurnOrder};
