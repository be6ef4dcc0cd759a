use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::net_value::NetValuePoint;
use crate::models::transaction::Transaction;
use crate::services::ledger_service::{validate_ledger_consistency, validate_transaction};

/// Current export document version.
pub const CURRENT_VERSION: u16 = 1;

/// The export/import interchange document — also the on-disk format.
///
/// Carries the full persisted state: transactions, net-value history, and
/// the initial cash balance, stamped with an export timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: u16,

    pub exported_at: DateTime<Utc>,

    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub net_values: Vec<NetValuePoint>,

    #[serde(default)]
    pub initial_cash: f64,
}

impl ExportDocument {
    /// Snapshot a ledger into an export document, stamped now.
    #[must_use]
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            version: CURRENT_VERSION,
            exported_at: Utc::now(),
            transactions: ledger.transactions.clone(),
            net_values: ledger.net_values.clone(),
            initial_cash: ledger.initial_cash,
        }
    }

    /// Consume the document into a ledger. `validate` must have passed.
    #[must_use]
    pub fn into_ledger(self) -> Ledger {
        Ledger {
            transactions: self.transactions,
            net_values: self.net_values,
            initial_cash: self.initial_cash,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize document: {e}")))
    }

    /// Parse and validate a document from JSON.
    ///
    /// Structural parse failures and field-level problems (malformed
    /// transactions, inconsistent sells, non-finite numbers) are all
    /// recoverable errors — nothing is applied from a bad document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let document: ExportDocument = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Field-level schema validation beyond what serde's shape check
    /// gives us.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.version == 0 || self.version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(self.version));
        }

        if !self.initial_cash.is_finite() || self.initial_cash < 0.0 {
            return Err(CoreError::InvalidDocument(format!(
                "initial_cash must be a finite non-negative number, got {}",
                self.initial_cash
            )));
        }

        for t in &self.transactions {
            validate_transaction(t)
                .map_err(|e| CoreError::InvalidDocument(format!("transaction {}: {e}", t.id)))?;
        }
        validate_ledger_consistency(&self.transactions)
            .map_err(|e| CoreError::InvalidDocument(e.to_string()))?;

        for point in &self.net_values {
            if !point.net_value.is_finite() || !point.total_assets.is_finite() {
                return Err(CoreError::InvalidDocument(format!(
                    "net value point on {} contains a non-finite number",
                    point.date
                )));
            }
        }
        if self.net_values.windows(2).any(|w| w[0].date > w[1].date) {
            return Err(CoreError::InvalidDocument(
                "net value series is not in chronological order".into(),
            ));
        }

        Ok(())
    }
}
