use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::{AssetKey, AssetType};

/// Type of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Acquiring units of an asset
    Buy,
    /// Disposing of units
    Sell,
    /// A cash distribution; reduces cost basis, quantity must be 0
    Dividend,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "buy"),
            TransactionType::Sell => write!(f, "sell"),
            TransactionType::Dividend => write!(f, "dividend"),
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest quantity first
    QuantityDesc,
    /// Smallest quantity first
    QuantityAsc,
    /// Alphabetical by symbol
    SymbolAsc,
    /// Reverse alphabetical by symbol
    SymbolDesc,
}

/// The user-editable fields of a transaction.
///
/// Drafts carry no identity or bookkeeping timestamps — those are minted
/// when the draft is committed to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    /// Business date of the trade (daily granularity)
    pub date: NaiveDate,

    pub asset_type: AssetType,

    /// Ticker symbol; uppercased on commit
    pub symbol: String,

    /// Human-readable name (e.g., "Apple Inc."), carried for display only
    pub name: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Unit price for buy/sell; for dividends, the payout when `amount` is absent
    pub price: f64,

    /// Number of units; must be 0 for dividends
    pub quantity: f64,

    /// Non-negative transaction cost
    pub fee: f64,

    /// Explicit cash amount; preferred over `price` for dividends
    #[serde(default)]
    pub amount: Option<f64>,

    /// Optional free-text memo
    #[serde(default)]
    pub note: Option<String>,
}

/// A single record in the transaction ledger.
///
/// Immutable once created; the only sanctioned mutation path is
/// `LedgerService::update_transaction`, which bumps `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, never reused
    pub id: Uuid,

    /// Business date of the trade — not necessarily ledger insertion order
    pub date: NaiveDate,

    pub asset_type: AssetType,

    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Display label
    pub name: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub price: f64,

    pub quantity: f64,

    pub fee: f64,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(default)]
    pub note: Option<String>,

    /// Bookkeeping timestamps — not used in any computation
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Commit a draft: mint an id and timestamps, normalize the symbol.
    pub fn new(draft: TransactionDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
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
            created_at: now,
            updated_at: now,
        }
    }

    /// The composite position key this transaction belongs to.
    #[must_use]
    pub fn asset_key(&self) -> AssetKey {
        AssetKey::new(self.asset_type, self.symbol.clone())
    }

    /// Cash amount of a distribution: explicit `amount` when present,
    /// otherwise `price` stands in as the payout.
    #[must_use]
    pub fn cash_amount(&self) -> f64 {
        self.amount.unwrap_or(self.price)
    }
}
