use serde::{Deserialize, Serialize};

use super::position::ValuedPosition;

/// Snapshot of the whole portfolio: open positions valued at current
/// prices, plus cash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Market value of all open positions plus cash
    pub total_assets: f64,

    /// Sum of open positions' cost basis
    pub total_cost: f64,

    /// Unrealized: sum(market_value) − sum(cost_amount)
    pub total_profit_loss: f64,

    /// `total_profit_loss / total_cost * 100`, 0 when total cost is 0
    pub total_profit_loss_percent: f64,

    /// Cash component included in `total_assets`
    pub cash: f64,

    /// Open positions (quantity > 0), in first-seen ledger order
    pub positions: Vec<ValuedPosition>,
}
