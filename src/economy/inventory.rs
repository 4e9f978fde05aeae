//! Owned powerups and their current prices

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::PowerupKey;

/// Owned count per powerup; always holds every catalog key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Powerups {
    counts: BTreeMap<PowerupKey, u32>,
}

impl Default for Powerups {
    fn default() -> Self {
        Self::new()
    }
}

impl Powerups {
    /// Empty inventory
    pub fn new() -> Self {
        Self {
            counts: PowerupKey::all().iter().map(|k| (*k, 0)).collect(),
        }
    }

    pub fn count(&self, key: PowerupKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn owns(&self, key: PowerupKey) -> bool {
        self.count(key) > 0
    }

    /// Add one level or unit
    pub fn add(&mut self, key: PowerupKey) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Spend one unit; false if none are owned
    pub fn consume(&mut self, key: PowerupKey) -> bool {
        match self.counts.get_mut(&key) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// (key, count) in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (PowerupKey, u32)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

/// Current price per powerup; always holds every catalog key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: BTreeMap<PowerupKey, u64>,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceTable {
    /// Catalog starting prices
    pub fn new() -> Self {
        Self {
            prices: PowerupKey::all()
                .iter()
                .map(|k| (*k, k.info().initial_price))
                .collect(),
        }
    }

    pub fn get(&self, key: PowerupKey) -> u64 {
        self.prices
            .get(&key)
            .copied()
            .unwrap_or_else(|| key.info().initial_price)
    }

    pub(crate) fn set(&mut self, key: PowerupKey, price: u64) {
        self.prices.insert(key, price);
    }

    /// (key, price) in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (PowerupKey, u64)> + '_ {
        self.prices.iter().map(|(k, v)| (*k, *v))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&PowerupKey, &mut u64)> {
        self.prices.iter_mut()
    }
}
