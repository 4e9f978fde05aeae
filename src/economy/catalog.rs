//! Powerup catalog
//!
//! The fixed set of purchasable powerups, in shop order.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

/// Purchasable powerups
///
/// Declaration order is catalog order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerupKey {
    /// First die always shows 6
    LoadedDice,
    /// Trips deal double damage
    DoubleDown,
    /// +1 to every point value per level
    PointBoost,
    /// 1-1-1 becomes 6-6-6 once per round
    AceSaver,
    /// Unlimited free rerolls on no score
    GuaranteedPoint,
    /// Every die lands 4-6
    HighRoller,
    /// Set one die by hand, once per round per level
    WildDie,
    /// +1 manual reroll per round per level
    ExtraReroll,
    /// 15% per level to push towards 4-5-6
    LuckyClover,
    /// 20% per level to dodge 1-2-3
    DevilsWard,
    /// Act first next round (consumable)
    FirstStrike,
}

/// Static metadata for one powerup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerupInfo {
    pub key: PowerupKey,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// Stacking levels (40% price growth) vs one-time upgrade (50%)
    pub stackable: bool,
    /// Spent when used
    pub consumable: bool,
    pub initial_price: u64,
}

const CATALOG: [PowerupInfo; 11] = [
    PowerupInfo {
        key: PowerupKey::LoadedDice,
        name: "Loaded Dice",
        icon: "🎲",
        description: "One die locked to 6. Prevents 1-2-3",
        stackable: false,
        consumable: false,
        initial_price: 25,
    },
    PowerupInfo {
        key: PowerupKey::DoubleDown,
        name: "Double Down",
        icon: "💎",
        description: "Trips deal 2× damage",
        stackable: false,
        consumable: false,
        initial_price: 30,
    },
    PowerupInfo {
        key: PowerupKey::PointBoost,
        name: "Point Boost",
        icon: "📈",
        description: "+1 to all point values",
        stackable: true,
        consumable: false,
        initial_price: 15,
    },
    PowerupInfo {
        key: PowerupKey::AceSaver,
        name: "Ace Saver",
        icon: "✨",
        description: "1-1-1 becomes 6-6-6 once per round",
        stackable: false,
        consumable: false,
        initial_price: 35,
    },
    PowerupInfo {
        key: PowerupKey::GuaranteedPoint,
        name: "Guaranteed Point",
        icon: "🔁",
        description: "Unlimited free rerolls on no score",
        stackable: false,
        consumable: false,
        initial_price: 22,
    },
    PowerupInfo {
        key: PowerupKey::HighRoller,
        name: "High Roller",
        icon: "🎰",
        description: "All dice roll 4-6. Prevents 1-2-3!",
        stackable: false,
        consumable: false,
        initial_price: 40,
    },
    PowerupInfo {
        key: PowerupKey::WildDie,
        name: "Wild Die",
        icon: "🎯",
        description: "Set one die's value once per round",
        stackable: true,
        consumable: false,
        initial_price: 25,
    },
    PowerupInfo {
        key: PowerupKey::ExtraReroll,
        name: "Extra Reroll",
        icon: "🔄",
        description: "+1 manual reroll per round",
        stackable: true,
        consumable: false,
        initial_price: 12,
    },
    PowerupInfo {
        key: PowerupKey::LuckyClover,
        name: "Lucky Clover",
        icon: "🍀",
        description: "15% chance per level to push towards 4-5-6",
        stackable: true,
        consumable: false,
        initial_price: 30,
    },
    PowerupInfo {
        key: PowerupKey::DevilsWard,
        name: "Devil's Ward",
        icon: "🛡️",
        description: "20% chance per level to avoid 1-2-3",
        stackable: true,
        consumable: false,
        initial_price: 30,
    },
    PowerupInfo {
        key: PowerupKey::FirstStrike,
        name: "First Strike",
        icon: "⚡",
        description: "Go first next round (consumable)",
        stackable: true,
        consumable: true,
        initial_price: 20,
    },
];

impl PowerupKey {
    /// All keys in catalog order
    pub fn all() -> &'static [PowerupKey] {
        &[
            PowerupKey::LoadedDice,
            PowerupKey::DoubleDown,
            PowerupKey::PointBoost,
            PowerupKey::AceSaver,
            PowerupKey::GuaranteedPoint,
            PowerupKey::HighRoller,
            PowerupKey::WildDie,
            PowerupKey::ExtraReroll,
            PowerupKey::LuckyClover,
            PowerupKey::DevilsWard,
            PowerupKey::FirstStrike,
        ]
    }

    /// Catalog metadata
    pub fn info(&self) -> &'static PowerupInfo {
        &CATALOG[*self as usize]
    }

    /// Wire name, e.g. "loadedDice"
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKey::LoadedDice => "loadedDice",
            PowerupKey::DoubleDown => "doubleDown",
            PowerupKey::PointBoost => "pointBoost",
            PowerupKey::AceSaver => "aceSaver",
            PowerupKey::GuaranteedPoint => "guaranteedPoint",
            PowerupKey::HighRoller => "highRoller",
            PowerupKey::WildDie => "wildDie",
            PowerupKey::ExtraReroll => "extraReroll",
            PowerupKey::LuckyClover => "luckyClover",
            PowerupKey::DevilsWard => "devilsWard",
            PowerupKey::FirstStrike => "firstStrike",
        }
    }
}

impl FromStr for PowerupKey {
    type Err = EngineError;

    /// Accepts camelCase, snake_case, kebab-case, or spaced names, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' ' | '\''))
            .flat_map(|c| c.to_lowercase())
            .collect();
        PowerupKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str().to_lowercase() == folded)
            .ok_or_else(|| EngineError::UnknownPowerup(s.to_string()))
    }
}

impl std::fmt::Display for PowerupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
