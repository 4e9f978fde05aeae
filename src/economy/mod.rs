//! Powerup economy
//!
//! - Fixed catalog of powerups with metadata and starting prices
//! - Inventory and price tables keyed by catalog key
//! - Purchases with per-key price growth and compounding global inflation

mod catalog;
mod inventory;
mod pricing;

pub use catalog::{PowerupInfo, PowerupKey};
pub use inventory::{PriceTable, Powerups};
pub use pricing::{
    active_powerups, apply_global_inflation, calculate_new_price, purchase, shop_entries,
    ActivePowerup, Purchase, ShopEntry, GLOBAL_INFLATION, ONE_TIME_INCREASE, STACKABLE_INCREASE,
};
