use std::collections::HashMap;

use super::asset::{AssetKey, AssetType};

/// User-supplied current prices, keyed by composite asset key.
///
/// There are no price feeds — the user enters current prices by hand and
/// the valuation engine looks them up here, falling back to cost price
/// for assets without an entry. Not persisted with the ledger.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    prices: HashMap<AssetKey, f64>,
}

impl PriceBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current price for an asset. Overwrites any previous entry.
    pub fn set(&mut self, asset_type: AssetType, symbol: &str, price: f64) {
        self.prices.insert(AssetKey::new(asset_type, symbol), price);
    }

    #[must_use]
    pub fn get(&self, key: &AssetKey) -> Option<f64> {
        self.prices.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn clear(&mut self) {
        self.prices.clear();
    }
}
