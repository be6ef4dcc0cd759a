use crate::models::price::PriceBook;
use crate::models::position::ValuedPosition;
use crate::models::summary::PortfolioSummary;
use crate::models::transaction::Transaction;
use crate::services::position_service::PositionService;

/// Combines the position book with user-supplied current prices and cash
/// into a portfolio summary.
///
/// Pure and synchronous. Prices come from a `PriceBook` the caller
/// maintains; a position without a price entry is valued at its cost
/// price, showing zero unrealized P/L rather than erroring.
pub struct ValuationService {
    position_service: PositionService,
}

impl ValuationService {
    pub fn new() -> Self {
        Self {
            position_service: PositionService::new(),
        }
    }

    /// Value the portfolio: positions at current (or cost) prices, plus
    /// cash.
    ///
    /// Per-position `profit_loss_percent` is `None` when the cost basis is
    /// not positive — the caller decides how to render an undefined
    /// percentage. The total percentage is 0 when total cost is 0.
    pub fn compute_summary(
        &self,
        transactions: &[Transaction],
        prices: &PriceBook,
        cash: f64,
    ) -> PortfolioSummary {
        let positions = self.position_service.compute_positions(transactions);

        let mut total_market_value = 0.0;
        let mut total_cost = 0.0;

        let valued: Vec<ValuedPosition> = positions
            .into_iter()
            .map(|position| {
                let current_price = prices
                    .get(&position.asset_key())
                    .unwrap_or(position.cost_price);
                let market_value = current_price * position.quantity;
                let profit_loss = market_value - position.cost_amount;
                let profit_loss_percent = if position.cost_amount > 0.0 {
                    Some(profit_loss / position.cost_amount * 100.0)
                } else {
                    None
                };

                total_market_value += market_value;
                total_cost += position.cost_amount;

                ValuedPosition {
                    position,
                    current_price,
                    market_value,
                    profit_loss,
                    profit_loss_percent,
                }
            })
            .collect();

        let total_profit_loss = total_market_value - total_cost;
        let total_profit_loss_percent = if total_cost > 0.0 {
            total_profit_loss / total_cost * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            total_assets: total_market_value + cash,
            total_cost,
            total_profit_loss,
            total_profit_loss_percent,
            cash,
            positions: valued,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
