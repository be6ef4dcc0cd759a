use serde::{Deserialize, Serialize};

/// Trade-level performance statistics derived directly from the ledger's
/// buy/sell records, independent of the position book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// `(total sell proceeds − total buy cost) / total buy cost * 100`,
    /// 0 when there are no buys
    pub total_return: f64,

    /// Total return compounded to a 365-day period over the ledger's span
    pub annualized_return: f64,

    /// Maximum peak-to-trough decline of the net-value series, percent
    pub max_drawdown: f64,

    /// `profitable_trades / total_trades * 100`, 0 with no trades
    pub win_rate: f64,

    /// `average_profit / average_loss`, 0 when average loss is 0
    pub profit_loss_ratio: f64,

    /// Count of all sell transactions, matched or not
    pub total_trades: usize,

    pub profitable_trades: usize,

    /// `total_trades - profitable_trades`
    pub losing_trades: usize,

    /// Sells with no buy of the same symbol dated strictly earlier;
    /// excluded from the win/loss tallies but surfaced here
    pub unattributed_sells: usize,

    /// Mean profit across profitable matched trades, 0 with none
    pub average_profit: f64,

    /// Mean absolute loss across losing matched trades, 0 with none
    pub average_loss: f64,
}
