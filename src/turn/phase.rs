//! Engine phases and round order

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the engine is in a run
///
/// Enemy turns run to completion inside the command that triggers them,
/// so there is no separate enemy phase to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No run in progress
    Menu,
    /// Between rounds; the shop and first strike are available
    RoundStart,
    Shop,
    /// Player must roll
    PlayerTurn,
    /// Player holds a scoring roll and must act on it
    ActionPending,
    RunVictory,
    RunDefeat,
}

impl Phase {
    /// A round is being fought
    pub fn in_round(&self) -> bool {
        matches!(self, Phase::PlayerTurn | Phase::ActionPending)
    }

    /// The run has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::RunVictory | Phase::RunDefeat)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Menu => "menu",
            Phase::RoundStart => "round start",
            Phase::Shop => "shop",
            Phase::PlayerTurn => "player turn",
            Phase::ActionPending => "action pending",
            Phase::RunVictory => "run victory",
            Phase::RunDefeat => "run defeat",
        };
        write!(f, "{}", s)
    }
}

/// Decides who acts first each round
///
/// Alternates every round starting enemy-first. An armed first strike
/// puts the player first for one round without disturbing the alternation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    player_first_next: bool,
    first_strike_armed: bool,
}

impl TurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm first strike for the next round. Returns false if already armed.
    pub fn arm_first_strike(&mut self) -> bool {
        if self.first_strike_armed {
            return false;
        }
        self.first_strike_armed = true;
        true
    }

    pub fn first_strike_armed(&self) -> bool {
        self.first_strike_armed
    }

    /// Who would act first if a round began now
    pub fn peek(&self) -> bool {
        self.first_strike_armed || self.player_first_next
    }

    /// Advance to the next round. Returns true when the player acts first.
    pub fn next_round(&mut self) -> bool {
        let player_first = self.peek();
        debug!(
            "Turn order: player_first={} (alternation={}, first_strike={})",
            player_first, self.player_first_next, self.first_strike_armed
        );
        self.first_strike_armed = false;
        self.player_first_next = !self.player_first_next;
        player_first
    }
}
