use serde::{Deserialize, Serialize};

use super::asset::{AssetKey, AssetType};

/// An aggregated holding derived by replaying the ledger.
///
/// Ephemeral — recomputed from scratch on every query, never persisted.
/// Cost accounting is a single blended weighted-average pool per asset:
/// partial sells remove a proportional share of the basis, dividends
/// reduce it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Display name from the first transaction seen for this asset
    pub name: String,

    pub asset_type: AssetType,

    /// Units currently held
    pub quantity: f64,

    /// Total cost basis: buy cost + fees − basis removed on sells − dividends
    pub cost_amount: f64,

    /// `cost_amount / quantity`, only refreshed while quantity > 0;
    /// holds the last meaningful value when the position empties
    pub cost_price: f64,
}

impl Position {
    #[must_use]
    pub fn asset_key(&self) -> AssetKey {
        AssetKey::new(self.asset_type, self.symbol.clone())
    }
}

/// A position with valuation attached from user-supplied current prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedPosition {
    #[serde(flatten)]
    pub position: Position,

    /// Supplied price, or `cost_price` when no price is known —
    /// an un-priced holding shows zero unrealized P/L, not an error
    pub current_price: f64,

    /// `current_price * quantity`
    pub market_value: f64,

    /// `market_value - cost_amount`
    pub profit_loss: f64,

    /// `profit_loss / cost_amount * 100`; `None` when the cost basis is
    /// not positive, so callers render "—" instead of a non-finite number
    pub profit_loss_percent: Option<f64>,
}
