//! Dice engine
//!
//! Cee-lo rolls with powerup-driven bias:
//! - Randomness sources (seeded, OS-seeded, scripted)
//! - Raw rolls with loaded dice / high roller
//! - Luck corrections (Devil's Ward, Lucky Clover)
//! - Classification into instant win, instant loss, trips, point, no score

mod analyze;
mod luck;
mod roll;
mod source;

pub use analyze::{analyze_roll, RollKind, RollResult, TRIPS_BONUS};
pub use luck::{apply_luck_modifiers, LuckOutcome, DEVILS_WARD_CHANCE, LUCKY_CLOVER_CHANCE};
pub use roll::{format_dice, roll_dice, roll_three, Dice, DiceModifiers, DICE_COUNT};
pub use source::{DiceSource, RandomDice, ScriptedDice};
