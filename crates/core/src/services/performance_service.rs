use crate::models::metrics::PerformanceMetrics;
use crate::models::net_value::NetValuePoint;
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::drawdown;

/// Computes trade-level performance statistics directly from the ledger's
/// buy/sell records, independent of the position book.
///
/// Pure and synchronous, like the other engines.
pub struct PerformanceService;

impl PerformanceService {
    pub fn new() -> Self {
        Self
    }

    /// Derive performance metrics from the ledger and the net-value
    /// series.
    ///
    /// Profit attribution matches each sell to the **first** buy in
    /// ledger order with the same symbol and a strictly earlier date.
    /// This exact tie-break is load-bearing: changing it (to earliest
    /// date, FIFO across lots, or proportional matching) silently changes
    /// historical performance numbers. Matching is by bare symbol, not
    /// asset-type-qualified.
    ///
    /// `total_trades` counts every sell; sells with no matching buy are
    /// excluded from the win/loss tallies and reported in
    /// `unattributed_sells`.
    pub fn compute_metrics(
        &self,
        transactions: &[Transaction],
        net_values: &[NetValuePoint],
    ) -> PerformanceMetrics {
        let buys: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Buy)
            .collect();
        let sells: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Sell)
            .collect();

        let mut total_profit = 0.0;
        let mut total_loss = 0.0;
        let mut profitable_trades = 0usize;
        let mut unattributed_sells = 0usize;

        for sell in &sells {
            let matched_buy = buys
                .iter()
                .find(|b| b.symbol == sell.symbol && b.date < sell.date);

            match matched_buy {
                Some(buy) => {
                    let profit =
                        (sell.price - buy.price) * sell.quantity - sell.fee - buy.fee;
                    if profit > 0.0 {
                        total_profit += profit;
                        profitable_trades += 1;
                    } else {
                        total_loss += profit.abs();
                    }
                }
                None => unattributed_sells += 1,
            }
        }

        let total_trades = sells.len();
        let win_rate = if total_trades > 0 {
            profitable_trades as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let average_profit = if profitable_trades > 0 {
            total_profit / profitable_trades as f64
        } else {
            0.0
        };
        // Losing trades counts every non-profitable sell, unattributed
        // ones included — the denominator the historical numbers use
        let losing_trades = total_trades - profitable_trades;
        let average_loss = if losing_trades > 0 {
            total_loss / losing_trades as f64
        } else {
            0.0
        };
        let profit_loss_ratio = if average_loss > 0.0 {
            average_profit / average_loss
        } else {
            0.0
        };

        // Overall return: all capital out vs. all proceeds in
        let initial_amount: f64 = buys
            .iter()
            .map(|t| t.price * t.quantity + t.fee)
            .sum();
        let final_amount: f64 = sells
            .iter()
            .map(|t| t.price * t.quantity - t.fee)
            .sum();
        let total_return = if initial_amount > 0.0 {
            (final_amount - initial_amount) / initial_amount * 100.0
        } else {
            0.0
        };

        // Span by ledger position (first/last record), not by date sort
        let days_held = match (transactions.first(), transactions.last()) {
            (Some(first), Some(last)) => (last.date - first.date).num_days(),
            _ => 1,
        };
        // Fees can push the return below -100%, leaving a negative base
        // that powf would turn into NaN. Fall back to the 0 sentinel.
        let growth = 1.0 + total_return / 100.0;
        let annualized_return = if days_held > 0 && growth > 0.0 {
            (growth.powf(365.0 / days_held as f64) - 1.0) * 100.0
        } else {
            0.0
        };

        PerformanceMetrics {
            total_return,
            annualized_return,
            max_drawdown: drawdown::max_drawdown(net_values),
            win_rate,
            profit_loss_ratio,
            total_trades,
            profitable_trades,
            losing_trades,
            unattributed_sells,
            average_profit,
            average_loss,
        }
    }
}

impl Default for PerformanceService {
    fn default() -> Self {
        Self::new()
    }
}
