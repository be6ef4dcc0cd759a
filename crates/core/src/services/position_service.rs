use std::collections::HashMap;

use log::warn;

use crate::models::asset::AssetKey;
use crate::models::position::Position;
use crate::models::transaction::{Transaction, TransactionType};

/// Folds the transaction ledger into a per-asset position book using
/// running weighted-average cost accounting.
///
/// Pure — a function of the transaction slice, nothing else. Transactions
/// are replayed in ledger order (insertion order, which is trusted and
/// never re-sorted by date).
pub struct PositionService;

impl PositionService {
    pub fn new() -> Self {
        Self
    }

    /// Replay the ledger into a position book.
    ///
    /// Accounting per asset key:
    /// - buy: `cost_amount += price * quantity + fee`, quantity grows
    /// - sell: a proportional share of the cost basis leaves with the
    ///   units (`cost_amount -= cost_amount * sold/held`), then the fee
    ///   reduces the basis unconditionally
    /// - dividend: the payout reduces the basis directly, quantity
    ///   unchanged
    ///
    /// `cost_price` is refreshed only while quantity stays positive, so a
    /// closed-out position keeps its last meaningful per-unit cost.
    ///
    /// Output keeps the order assets were first seen in; positions with
    /// `quantity <= 0` are dropped.
    ///
    /// A well-formed ledger never sells more than it holds (the mutation
    /// boundary enforces that). If handed a degenerate one anyway, a sell
    /// against an empty position is skipped and an oversell is clamped at
    /// the full basis, rather than letting a zero denominator poison the
    /// book with non-finite values.
    pub fn compute_positions(&self, transactions: &[Transaction]) -> Vec<Position> {
        let mut order: Vec<AssetKey> = Vec::new();
        let mut book: HashMap<AssetKey, Position> = HashMap::new();

        for t in transactions {
            let key = t.asset_key();
            let position = book.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Position {
                    symbol: t.symbol.clone(),
                    name: t.name.clone(),
                    asset_type: t.asset_type,
                    quantity: 0.0,
                    cost_amount: 0.0,
                    cost_price: 0.0,
                }
            });

            match t.kind {
                TransactionType::Buy => {
                    position.cost_amount += t.price * t.quantity + t.fee;
                    position.quantity += t.quantity;
                }
                TransactionType::Sell => {
                    if position.quantity <= 0.0 {
                        warn!(
                            "skipping sell of {} {} on {}: no units held",
                            t.quantity, t.symbol, t.date
                        );
                        continue;
                    }
                    let sell_ratio = (t.quantity / position.quantity).min(1.0);
                    position.cost_amount -= position.cost_amount * sell_ratio;
                    position.quantity = (position.quantity - t.quantity).max(0.0);
                    // Fee reduces the basis regardless of the ratio
                    position.cost_amount -= t.fee;
                }
                TransactionType::Dividend => {
                    position.cost_amount -= t.cash_amount();
                }
            }

            if position.quantity > 0.0 {
                position.cost_price = position.cost_amount / position.quantity;
            }
        }

        order
            .into_iter()
            .filter_map(|key| book.remove(&key))
            .filter(|p| p.quantity > 0.0)
            .collect()
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}
