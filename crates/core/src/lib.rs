pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use models::{
    asset::{AssetKey, AssetType},
    ledger::Ledger,
    metrics::PerformanceMetrics,
    net_value::NetValuePoint,
    position::Position,
    price::PriceBook,
    summary::PortfolioSummary,
    transaction::{Transaction, TransactionDraft, TransactionSortOrder, TransactionType},
};
use services::{
    ledger_service::LedgerService, performance_service::PerformanceService,
    position_service::PositionService, valuation_service::ValuationService,
};
use storage::{document::ExportDocument, store::LedgerStore};

use errors::CoreError;

/// Main entry point for the Invest Tracker core library.
///
/// Owns the ledger state, the user-supplied price book, and the services
/// that operate on them. All computations are pure reads over the current
/// snapshot — persistence happens only when the caller asks for it, so
/// the read-compute-write cycle is owned here, not inside the engines.
#[must_use]
pub struct InvestTracker {
    ledger: Ledger,
    prices: PriceBook,
    ledger_service: LedgerService,
    position_service: PositionService,
    valuation_service: ValuationService,
    performance_service: PerformanceService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for InvestTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestTracker")
            .field("transactions", &self.ledger.transactions.len())
            .field("net_values", &self.ledger.net_values.len())
            .field("initial_cash", &self.ledger.initial_cash)
            .field("prices", &self.prices.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl InvestTracker {
    /// Create a brand new empty tracker.
    pub fn create_new() -> Self {
        Self::build(Ledger::default())
    }

    /// Load a tracker from a ledger file on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let ledger = LedgerStore::load_from_file(path)?;
        Ok(Self::build(ledger))
    }

    /// Save the ledger to a file on disk (atomic write).
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        LedgerStore::save_to_file(&self.ledger, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Transaction Management ──────────────────────────────────────

    /// Record a new transaction. Returns its generated id.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<uuid::Uuid, CoreError> {
        let id = self.ledger_service.add_transaction(&mut self.ledger, draft)?;
        self.dirty = true;
        Ok(id)
    }

    /// Update an existing transaction's user-editable fields.
    /// Validates the new ledger state before committing.
    pub fn update_transaction(
        &mut self,
        id: uuid::Uuid,
        draft: TransactionDraft,
    ) -> Result<(), CoreError> {
        self.ledger_service
            .update_transaction(&mut self.ledger, id, draft)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a transaction by id. Returns the removed record.
    pub fn remove_transaction(&mut self, id: uuid::Uuid) -> Result<Transaction, CoreError> {
        let removed = self
            .ledger_service
            .remove_transaction(&mut self.ledger, id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Replace the whole ledger at once. All records are validated first;
    /// if any fails, nothing is applied.
    pub fn replace_transactions(
        &mut self,
        transactions: Vec<Transaction>,
    ) -> Result<(), CoreError> {
        self.ledger_service
            .replace_transactions(&mut self.ledger, transactions)?;
        self.dirty = true;
        Ok(())
    }

    /// Get a single transaction by its id.
    #[must_use]
    pub fn get_transaction(&self, id: uuid::Uuid) -> Option<&Transaction> {
        self.ledger.transactions.iter().find(|t| t.id == id)
    }

    /// Get all transactions, newest business date first.
    #[must_use]
    pub fn get_transactions(&self) -> Vec<&Transaction> {
        self.get_transactions_sorted(&TransactionSortOrder::DateDesc)
    }

    /// Get transactions sorted by a specific order.
    #[must_use]
    pub fn get_transactions_sorted(&self, order: &TransactionSortOrder) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.ledger.transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => transactions.sort_by(|a, b| b.date.cmp(&a.date)),
            TransactionSortOrder::DateAsc => transactions.sort_by(|a, b| a.date.cmp(&b.date)),
            TransactionSortOrder::QuantityDesc => transactions.sort_by(|a, b| {
                b.quantity
                    .partial_cmp(&a.quantity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            TransactionSortOrder::QuantityAsc => transactions.sort_by(|a, b| {
                a.quantity
                    .partial_cmp(&b.quantity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            TransactionSortOrder::SymbolAsc => {
                transactions.sort_by(|a, b| a.symbol.cmp(&b.symbol))
            }
            TransactionSortOrder::SymbolDesc => {
                transactions.sort_by(|a, b| b.symbol.cmp(&a.symbol))
            }
        }
        transactions
    }

    /// Transactions for a symbol (case-insensitive), newest first.
    #[must_use]
    pub fn transactions_for_symbol(&self, symbol: &str) -> Vec<&Transaction> {
        let upper = symbol.to_uppercase();
        let mut transactions: Vec<&Transaction> = self
            .ledger
            .transactions
            .iter()
            .filter(|t| t.symbol == upper)
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    /// Transactions of a given type (buy/sell/dividend), newest first.
    #[must_use]
    pub fn transactions_by_type(&self, kind: TransactionType) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self
            .ledger
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    /// Transactions within a business-date range (inclusive), newest first.
    #[must_use]
    pub fn transactions_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self
            .ledger
            .transactions
            .iter()
            .filter(|t| t.date >= from && t.date <= to)
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    /// Transactions grouped by business date, ascending.
    #[must_use]
    pub fn transactions_grouped_by_date(&self) -> BTreeMap<NaiveDate, Vec<&Transaction>> {
        self.ledger_service.transactions_grouped_by_date(&self.ledger)
    }

    /// Total number of transactions in the ledger.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.transactions.len()
    }

    /// Earliest business date in the ledger.
    #[must_use]
    pub fn earliest_transaction_date(&self) -> Option<NaiveDate> {
        self.ledger.transactions.iter().map(|t| t.date).min()
    }

    /// Latest business date in the ledger.
    #[must_use]
    pub fn latest_transaction_date(&self) -> Option<NaiveDate> {
        self.ledger.transactions.iter().map(|t| t.date).max()
    }

    // ── Cash & Prices ───────────────────────────────────────────────

    /// Set the cash balance included in total assets.
    pub fn set_initial_cash(&mut self, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "cash must be a finite non-negative number, got {amount}"
            )));
        }
        self.ledger.initial_cash = amount;
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn initial_cash(&self) -> f64 {
        self.ledger.initial_cash
    }

    /// Set the user-entered current price for an asset.
    /// Prices live in memory only — they are not persisted with the ledger.
    pub fn set_current_price(
        &mut self,
        asset_type: AssetType,
        symbol: &str,
        price: f64,
    ) -> Result<(), CoreError> {
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::Validation(format!(
                "price must be a finite non-negative number, got {price}"
            )));
        }
        self.prices.set(asset_type, symbol, price);
        Ok(())
    }

    /// Current price for an asset, if one has been entered.
    #[must_use]
    pub fn current_price(&self, asset_type: AssetType, symbol: &str) -> Option<f64> {
        self.prices.get(&AssetKey::new(asset_type, symbol))
    }

    /// Forget all entered current prices.
    pub fn clear_current_prices(&mut self) {
        self.prices.clear();
    }

    // ── Net Value History ───────────────────────────────────────────

    /// Record (or overwrite) a net-value point for a date. The series
    /// stays chronologically sorted and feeds the drawdown calculation.
    pub fn record_net_value(&mut self, point: NetValuePoint) {
        self.ledger_service.record_net_value(&mut self.ledger, point);
        self.dirty = true;
    }

    /// The recorded net-value series, chronological.
    #[must_use]
    pub fn net_values(&self) -> &[NetValuePoint] {
        &self.ledger.net_values
    }

    // ── Computation ─────────────────────────────────────────────────

    /// Replay the ledger into the current position book
    /// (open positions only, first-seen order).
    #[must_use]
    pub fn get_positions(&self) -> Vec<Position> {
        self.position_service
            .compute_positions(&self.ledger.transactions)
    }

    /// Value the portfolio at the entered current prices plus cash.
    #[must_use]
    pub fn get_portfolio_summary(&self) -> PortfolioSummary {
        self.valuation_service.compute_summary(
            &self.ledger.transactions,
            &self.prices,
            self.ledger.initial_cash,
        )
    }

    /// Trade-level performance statistics, including the maximum drawdown
    /// of the recorded net-value series.
    #[must_use]
    pub fn get_performance_metrics(&self) -> PerformanceMetrics {
        self.performance_service
            .compute_metrics(&self.ledger.transactions, &self.ledger.net_values)
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the full persisted state as pretty-printed JSON.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        ExportDocument::from_ledger(&self.ledger).to_json()
    }

    /// Import a previously exported document, replacing the current
    /// ledger. The document is parsed and validated in full before
    /// anything is applied — a bad document leaves the tracker untouched.
    pub fn import_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let document = ExportDocument::from_json(json)?;
        let ledger = document.into_ledger();
        let count = ledger.transactions.len();
        self.ledger = ledger;
        self.dirty = true;
        Ok(count)
    }

    /// Export all transactions as a CSV string.
    /// Columns: id, date, type, asset_type, symbol, name, price, quantity,
    /// fee, amount, note
    #[must_use]
    pub fn export_transactions_to_csv(&self) -> String {
        let mut csv =
            String::from("id,date,type,asset_type,symbol,name,price,quantity,fee,amount,note\n");
        for t in &self.ledger.transactions {
            let amount = t.amount.map(|a| a.to_string()).unwrap_or_default();
            let note = t.note.as_deref().unwrap_or("");
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{}\n",
                t.id,
                t.date,
                t.kind,
                t.asset_type,
                t.symbol,
                escape_csv_field(&t.name),
                t.price,
                t.quantity,
                t.fee,
                amount,
                escape_csv_field(note),
            ));
        }
        csv
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if state has changed since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            prices: PriceBook::new(),
            ledger_service: LedgerService::new(),
            position_service: PositionService::new(),
            valuation_service: ValuationService::new(),
            performance_service: PerformanceService::new(),
            dirty: false,
        }
    }
}

/// Quote a CSV field when it contains commas, quotes, or newlines.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
