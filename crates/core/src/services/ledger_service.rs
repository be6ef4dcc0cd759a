use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::asset::AssetKey;
use crate::models::ledger::Ledger;
use crate::models::net_value::NetValuePoint;
use crate::models::transaction::{Transaction, TransactionDraft, TransactionType};

/// Manages ledger mutations: add/update/remove transactions, net-value
/// recording.
///
/// Pure business logic — no I/O. All mutations validate first and roll
/// back on failure, so a `Ledger` is always well-formed: sells never
/// exceed the running quantity held at their ledger position.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Commit a draft to the ledger. Appends — insertion order is the
    /// replay order for all derived computations.
    pub fn add_transaction(
        &self,
        ledger: &mut Ledger,
        draft: TransactionDraft,
    ) -> Result<Uuid, CoreError> {
        let transaction = Transaction::new(draft);
        let id = transaction.id;
        validate_transaction(&transaction)?;

        ledger.transactions.push(transaction);
        if let Err(e) = validate_ledger_consistency(&ledger.transactions) {
            ledger.transactions.pop();
            return Err(e);
        }

        Ok(id)
    }

    /// Replace the user-editable fields of an existing transaction.
    /// Keeps id and `created_at`, bumps `updated_at`. Rolls back if the
    /// resulting ledger would be inconsistent.
    pub fn update_transaction(
        &self,
        ledger: &mut Ledger,
        id: Uuid,
        draft: TransactionDraft,
    ) -> Result<(), CoreError> {
        let idx = ledger
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;

        let old = ledger.transactions[idx].clone();
        let updated = Transaction {
            id: old.id,
            date: draft.date,
            asset_type: draft.asset_type,
            symbol: draft.symbol.to_uppercase(),
            name: draft.name,
            kind: draft.kind,
            price: draft.price,
            quantity: draft.quantity,
            fee: draft.fee,
            amount: draft.amount,
            note: draft.note,
            created_at: old.created_at,
            updated_at: chrono::Utc::now(),
        };

        validate_transaction(&updated)?;
        ledger.transactions[idx] = updated;

        if let Err(e) = validate_ledger_consistency(&ledger.transactions) {
            // Rollback: restore the old record
            ledger.transactions[idx] = old;
            return Err(e);
        }

        Ok(())
    }

    /// Remove a transaction by id. Fails (and rolls back) if removing a
    /// buy would make a later sell exceed holdings.
    pub fn remove_transaction(
        &self,
        ledger: &mut Ledger,
        id: Uuid,
    ) -> Result<Transaction, CoreError> {
        let idx = ledger
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;

        let removed = ledger.transactions.remove(idx);

        if removed.kind == TransactionType::Buy {
            if let Err(e) = validate_ledger_consistency(&ledger.transactions) {
                ledger.transactions.insert(idx, removed);
                return Err(e);
            }
        }

        Ok(removed)
    }

    /// Replace the whole ledger at once (import path). Every record is
    /// validated and the full sequence checked for consistency before
    /// anything is applied — all-or-nothing.
    pub fn replace_transactions(
        &self,
        ledger: &mut Ledger,
        transactions: Vec<Transaction>,
    ) -> Result<(), CoreError> {
        for t in &transactions {
            validate_transaction(t)?;
        }
        validate_ledger_consistency(&transactions)?;
        ledger.transactions = transactions;
        Ok(())
    }

    /// Upsert a net-value point, keyed by date. The series stays sorted
    /// chronologically — the drawdown calculator requires it.
    pub fn record_net_value(&self, ledger: &mut Ledger, point: NetValuePoint) {
        match ledger
            .net_values
            .binary_search_by_key(&point.date, |p| p.date)
        {
            Ok(idx) => ledger.net_values[idx] = point,
            Err(idx) => ledger.net_values.insert(idx, point),
        }
    }

    /// Group transactions by business date (ascending), preserving ledger
    /// order within each day.
    pub fn transactions_grouped_by_date<'a>(
        &self,
        ledger: &'a Ledger,
    ) -> BTreeMap<NaiveDate, Vec<&'a Transaction>> {
        let mut grouped: BTreeMap<NaiveDate, Vec<&Transaction>> = BTreeMap::new();
        for t in &ledger.transactions {
            grouped.entry(t.date).or_default().push(t);
        }
        grouped
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Field-level validation of a single transaction.
pub(crate) fn validate_transaction(t: &Transaction) -> Result<(), CoreError> {
    for (label, value) in [("price", t.price), ("quantity", t.quantity), ("fee", t.fee)] {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::Validation(format!(
                "{label} must be a finite non-negative number, got {value}"
            )));
        }
    }
    if let Some(amount) = t.amount {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "amount must be a finite non-negative number, got {amount}"
            )));
        }
    }
    if t.symbol.trim().is_empty() {
        return Err(CoreError::Validation("symbol must not be empty".into()));
    }

    match t.kind {
        TransactionType::Buy | TransactionType::Sell => {
            if t.quantity <= 0.0 {
                return Err(CoreError::Validation(format!(
                    "{} quantity must be positive, got {}",
                    t.kind, t.quantity
                )));
            }
        }
        TransactionType::Dividend => {
            if t.quantity != 0.0 {
                return Err(CoreError::Validation(format!(
                    "dividend quantity must be 0, got {}",
                    t.quantity
                )));
            }
        }
    }

    Ok(())
}

/// Replay the ledger checking that no sell exceeds the units held for its
/// asset at that point. Mutation boundaries enforce this so the engines
/// can stay lenient.
pub(crate) fn validate_ledger_consistency(
    transactions: &[Transaction],
) -> Result<(), CoreError> {
    let mut held: HashMap<AssetKey, f64> = HashMap::new();

    for t in transactions {
        let units = held.entry(t.asset_key()).or_insert(0.0);
        match t.kind {
            TransactionType::Buy => *units += t.quantity,
            TransactionType::Sell => {
                // Small tolerance for float accumulation on full close-outs
                if t.quantity > *units + 1e-9 {
                    return Err(CoreError::Validation(format!(
                        "cannot sell {} {} on {} — only {:.8} held at that point",
                        t.quantity, t.symbol, t.date, *units
                    )));
                }
                *units -= t.quantity;
            }
            TransactionType::Dividend => {}
        }
    }

    Ok(())
}
