//! Cee-lo roll classification

use serde::{Deserialize, Serialize};

use super::roll::{format_dice, Dice};

/// Bonus added to every trips value. The rules name one without a value.
pub const TRIPS_BONUS: u32 = 0;

/// Scoring category of a roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollKind {
    /// 4-5-6 in any order
    InstantWin,
    /// 1-2-3 in any order
    InstantLoss,
    /// All three dice match
    Trips,
    /// A pair plus a singleton
    Point,
    /// Nothing scores; rolled again for free
    NoScore,
}

impl RollKind {
    /// Trips and points are the only kinds an actor can act on
    pub fn is_scoring(&self) -> bool {
        matches!(self, RollKind::Trips | RollKind::Point)
    }

    /// Whether the roll ends the round on its own
    pub fn is_instant(&self) -> bool {
        matches!(self, RollKind::InstantWin | RollKind::InstantLoss)
    }
}

impl std::fmt::Display for RollKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RollKind::InstantWin => "instant win",
            RollKind::InstantLoss => "instant loss",
            RollKind::Trips => "trips",
            RollKind::Point => "point",
            RollKind::NoScore => "no score",
        };
        write!(f, "{}", s)
    }
}

/// A classified roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub kind: RollKind,
    /// Trip face or boosted point; 0 for every other kind
    pub value: u32,
    /// Dice in roll order, after modifiers
    pub dice_shown: Dice,
    /// The ace saver turned 1-1-1 into 6-6-6
    pub consumed_ace_saver: bool,
}

impl RollResult {
    fn new(kind: RollKind, value: u32, dice: Dice) -> Self {
        Self {
            kind,
            value,
            dice_shown: dice,
            consumed_ace_saver: false,
        }
    }

    /// Short human-readable summary, e.g. "POINT: 5"
    pub fn describe(&self) -> String {
        match self.kind {
            RollKind::InstantWin => "4-5-6 INSTANT WIN!".to_string(),
            RollKind::InstantLoss => "1-2-3 INSTANT LOSS!".to_string(),
            RollKind::Trips => {
                let face = if self.consumed_ace_saver { 6 } else { self.value };
                format!("TRIPS! {}", format_dice(&[face as u8; 3]))
            }
            RollKind::Point => format!("POINT: {}", self.value),
            RollKind::NoScore => "No score".to_string(),
        }
    }
}

/// Classify three dice.
///
/// Display order is preserved in the result; classification works on a
/// sorted copy. Precedence: 1-2-3, 4-5-6, trips, point, no score.
pub fn analyze_roll(
    dice: Dice,
    point_boost: u32,
    ace_saver_available: bool,
    ace_saver_used_this_round: bool,
) -> RollResult {
    let mut sorted = dice;
    sorted.sort_unstable();
    let [d1, d2, d3] = sorted;

    if sorted == [1, 2, 3] {
        return RollResult::new(RollKind::InstantLoss, 0, dice);
    }

    if sorted == [4, 5, 6] {
        return RollResult::new(RollKind::InstantWin, 0, dice);
    }

    if d1 == d2 && d2 == d3 {
        if d1 == 1 && ace_saver_available && !ace_saver_used_this_round {
            let mut result = RollResult::new(RollKind::Trips, 6 + TRIPS_BONUS, dice);
            result.consumed_ace_saver = true;
            return result;
        }
        return RollResult::new(RollKind::Trips, u32::from(d1) + TRIPS_BONUS, dice);
    }

    // Sorted, so a pair is always adjacent
    let point = if d1 == d2 {
        Some(d3)
    } else if d2 == d3 {
        Some(d1)
    } else {
        None
    };

    match point {
        Some(face) => RollResult::new(RollKind::Point, u32::from(face) + point_boost, dice),
        None => RollResult::new(RollKind::NoScore, 0, dice),
    }
}
