use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of the portfolio's net-value time series.
///
/// Recorded by the caller (typically one point per day from a summary
/// snapshot) and fed to the drawdown calculation. The series must be kept
/// in chronological order; `LedgerService::record_net_value` maintains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetValuePoint {
    pub date: NaiveDate,

    /// Per-unit net value of the portfolio
    pub net_value: f64,

    /// Total assets on that date (cash included)
    pub total_assets: f64,
}
