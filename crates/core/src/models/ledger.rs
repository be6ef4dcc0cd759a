use serde::{Deserialize, Serialize};

use super::net_value::NetValuePoint;
use super::transaction::Transaction;

/// The persisted data container: the transaction ledger plus the external
/// inputs that travel with it (net-value history, initial cash).
///
/// Transactions are kept in insertion order — the source of truth for all
/// derived state. The engines replay them in exactly this order and never
/// re-sort by date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// All transactions, in the order they were recorded
    pub transactions: Vec<Transaction>,

    /// Net-value time series, kept sorted by date
    #[serde(default)]
    pub net_values: Vec<NetValuePoint>,

    /// User-set cash balance included in total assets
    #[serde(default)]
    pub initial_cash: f64,
}
