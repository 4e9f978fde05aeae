//! Price scaling and purchases
//!
//! Buying a powerup raises its own price (40% stackable, 50% one-time),
//! then inflates every price by 2% compounded over the run's purchase count.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::PowerupKey;
use super::inventory::{PriceTable, Powerups};
use crate::error::EngineError;
use crate::state::RunState;

/// Global inflation per purchase, compounded
pub const GLOBAL_INFLATION: f64 = 1.02;

/// Own-price growth for stackable powerups
pub const STACKABLE_INCREASE: f64 = 1.4;

/// Own-price growth for one-time powerups
pub const ONE_TIME_INCREASE: f64 = 1.5;

/// Receipt for a completed purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub key: PowerupKey,
    /// Gold paid
    pub price: u64,
    /// Owned count after the purchase
    pub owned: u32,
    /// Price of the same key for the next purchase
    pub next_price: u64,
    pub gold_left: u64,
}

/// A powerup the player currently holds, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivePowerup {
    pub key: PowerupKey,
    pub label: &'static str,
    pub icon: &'static str,
    /// Count, shown only when more than one is owned
    pub value: Option<u32>,
}

/// A shop row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopEntry {
    pub key: PowerupKey,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub price: u64,
    pub owned: u32,
    pub affordable: bool,
    pub stackable: bool,
    pub consumable: bool,
}

/// Price of a key after buying it once
pub fn calculate_new_price(current: u64, stackable: bool) -> u64 {
    let multiplier = if stackable {
        STACKABLE_INCREASE
    } else {
        ONE_TIME_INCREASE
    };
    (current as f64 * multiplier).floor() as u64
}

/// Inflate every price by `GLOBAL_INFLATION ^ purchase_count`
pub fn apply_global_inflation(prices: &mut PriceTable, purchase_count: u32) {
    let exponent = i32::try_from(purchase_count).unwrap_or(i32::MAX);
    let multiplier = GLOBAL_INFLATION.powi(exponent);
    for (_, price) in prices.iter_mut() {
        *price = (*price as f64 * multiplier).floor() as u64;
    }
}

/// Buy one unit of `key`. Fails without touching the run when unaffordable.
pub fn purchase(run: &mut RunState, key: PowerupKey) -> Result<Purchase, EngineError> {
    let price = run.prices.get(key);
    if run.gold < price {
        debug!(
            "Insufficient gold for {}: have {} but needs {}",
            key, run.gold, price
        );
        return Err(EngineError::InsufficientFunds {
            key,
            price,
            gold: run.gold,
        });
    }

    let gold_before = run.gold;
    run.gold -= price;
    let owned = run.powerups.add(key);

    let bumped = calculate_new_price(price, key.info().stackable);
    run.prices.set(key, bumped);
    run.purchase_count += 1;
    apply_global_inflation(&mut run.prices, run.purchase_count);

    let next_price = run.prices.get(key);
    debug!(
        "Bought {} for {} gold: {} -> {} (next price {}, purchase #{})",
        key, price, gold_before, run.gold, next_price, run.purchase_count
    );

    Ok(Purchase {
        key,
        price,
        owned,
        next_price,
        gold_left: run.gold,
    })
}

/// Owned powerups in catalog order
pub fn active_powerups(powerups: &Powerups) -> Vec<ActivePowerup> {
    powerups
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(key, count)| {
            let info = key.info();
            ActivePowerup {
                key,
                label: info.name,
                icon: info.icon,
                value: (count > 1).then_some(count),
            }
        })
        .collect()
}

/// Full catalog with current prices and ownership
pub fn shop_entries(run: &RunState) -> Vec<ShopEntry> {
    PowerupKey::all()
        .iter()
        .map(|key| {
            let info = key.info();
            let price = run.prices.get(*key);
            ShopEntry {
                key: *key,
                name: info.name,
                icon: info.icon,
                description: info.description,
                price,
                owned: run.powerups.count(*key),
                affordable: run.gold >= price,
                stackable: info.stackable,
                consumable: info.consumable,
            }
        })
        .collect()
}
