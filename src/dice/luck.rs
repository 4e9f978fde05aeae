//! Luck modifiers applied to the player's automatic rolls
//!
//! - Devil's Ward: 20% per level to redraw one die of a 1-2-3
//! - Lucky Clover: 15% per level to lift the first low die into 4..=6

use serde::{Deserialize, Serialize};

use super::roll::Dice;
use super::source::DiceSource;

/// Chance per Devil's Ward level
pub const DEVILS_WARD_CHANCE: f64 = 0.20;

/// Chance per Lucky Clover level
pub const LUCKY_CLOVER_CHANCE: f64 = 0.15;

/// Dice after luck, plus which effects fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckOutcome {
    pub dice: Dice,
    pub devils_ward: bool,
    pub lucky_clover: bool,
}

fn is_one_two_three(dice: &Dice) -> bool {
    let mut sorted = *dice;
    sorted.sort_unstable();
    sorted == [1, 2, 3]
}

fn has_four_five_six(dice: &Dice) -> bool {
    [4, 5, 6].iter().all(|face| dice.contains(face))
}

/// Apply Devil's Ward then Lucky Clover.
///
/// Each check fires at most once. Lucky Clover sees the dice as Devil's
/// Ward left them. Levels of zero never draw from the source.
pub fn apply_luck_modifiers<D: DiceSource + ?Sized>(
    source: &mut D,
    dice: Dice,
    lucky_clover_level: u32,
    devils_ward_level: u32,
) -> LuckOutcome {
    let mut out = LuckOutcome {
        dice,
        devils_ward: false,
        lucky_clover: false,
    };

    if devils_ward_level > 0
        && is_one_two_three(&dice)
        && source.chance(DEVILS_WARD_CHANCE * f64::from(devils_ward_level))
    {
        let idx = source.pick_index(dice.len());
        out.dice[idx] = source.roll_face();
        out.devils_ward = true;
    }

    if lucky_clover_level > 0
        && !has_four_five_six(&out.dice)
        && source.chance(LUCKY_CLOVER_CHANCE * f64::from(lucky_clover_level))
    {
        if let Some(low) = out.dice.iter_mut().find(|face| **face < 4) {
            *low = source.roll_high_face();
            out.lucky_clover = true;
        }
    }

    out
}
