//! Raw dice rolls and the modifiers that bias them

use serde::{Deserialize, Serialize};

use super::source::DiceSource;
use crate::economy::{PowerupKey, Powerups};

/// Number of dice in a cee-lo roll
pub const DICE_COUNT: usize = 3;

/// Three dice in roll order
pub type Dice = [u8; DICE_COUNT];

/// Dice-affecting powerups for a single roll
///
/// Built once per roll from the owner's inventory so the modifier surface
/// can be tested without a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceModifiers {
    /// First die is forced to 6
    pub loaded_dice: bool,
    /// Dice below 4 are redrawn from 4..=6
    pub high_roller: bool,
    /// 15% per level to push one low die towards 4-5-6
    pub lucky_clover_level: u32,
    /// 20% per level to break up a 1-2-3
    pub devils_ward_level: u32,
    /// Added to every point value
    pub point_boost: u32,
    /// 1-1-1 upgrades to 6-6-6 once per round
    pub ace_saver: bool,
}

impl DiceModifiers {
    /// No modifiers (enemies roll plain dice)
    pub fn none() -> Self {
        Self::default()
    }

    /// Modifiers granted by a powerup inventory
    pub fn from_powerups(powerups: &Powerups) -> Self {
        Self {
            loaded_dice: powerups.owns(PowerupKey::LoadedDice),
            high_roller: powerups.owns(PowerupKey::HighRoller),
            lucky_clover_level: powerups.count(PowerupKey::LuckyClover),
            devils_ward_level: powerups.count(PowerupKey::DevilsWard),
            point_boost: powerups.count(PowerupKey::PointBoost),
            ace_saver: powerups.owns(PowerupKey::AceSaver),
        }
    }
}

/// Roll `count` dice, applying loaded dice and then high roller
pub fn roll_dice<D: DiceSource + ?Sized>(
    dice: &mut D,
    count: usize,
    loaded_dice: bool,
    high_roller: bool,
) -> Vec<u8> {
    let mut rolls: Vec<u8> = (0..count).map(|_| dice.roll_face()).collect();

    if loaded_dice {
        if let Some(first) = rolls.first_mut() {
            *first = 6;
        }
    }

    if high_roller {
        for face in rolls.iter_mut() {
            if *face < 4 {
                *face = dice.roll_high_face();
            }
        }
    }

    rolls
}

/// Roll a full cee-lo hand with the given modifiers
pub fn roll_three<D: DiceSource + ?Sized>(dice: &mut D, modifiers: &DiceModifiers) -> Dice {
    let rolls = roll_dice(dice, DICE_COUNT, modifiers.loaded_dice, modifiers.high_roller);
    [rolls[0], rolls[1], rolls[2]]
}

/// Format dice the way the log shows them: "3-5-5"
pub fn format_dice(dice: &[u8]) -> String {
    dice.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("-")
}
