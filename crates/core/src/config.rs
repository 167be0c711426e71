//! Session configuration.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`InventoryConfig::low_stock_threshold`].
pub const LOW_STOCK_THRESHOLD_ENV: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";

/// Environment variable overriding [`InventoryConfig::expiry_horizon_days`].
pub const EXPIRY_HORIZON_DAYS_ENV: &str = "STOCKROOM_EXPIRY_HORIZON_DAYS";

/// Defaults used by the convenience reports of an inventory session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Items with quantity strictly below this are low on stock.
    pub low_stock_threshold: u64,
    /// How many days ahead "expiring soon" looks.
    pub expiry_horizon_days: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 5,
            expiry_horizon_days: 7,
        }
    }
}

impl InventoryConfig {
    /// Load configuration from the process environment.
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            low_stock_threshold: parse_or(
                &lookup,
                LOW_STOCK_THRESHOLD_ENV,
                defaults.low_stock_threshold,
            ),
            expiry_horizon_days: parse_or(
                &lookup,
                EXPIRY_HORIZON_DAYS_ENV,
                defaults.expiry_horizon_days,
            ),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: core::str::FromStr + core::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "ignoring unparsable setting");
            default
        }),
    }
}
