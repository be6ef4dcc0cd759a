use std::path::Path;

use log::debug;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::document::ExportDocument;

/// Synchronous JSON file persistence for the ledger.
///
/// The on-disk format is the export document itself, so a saved file is
/// directly shareable. Saves are atomic: the document is written to a
/// temporary file in the target directory and renamed over the
/// destination, so a crash mid-write never leaves a torn file.
pub struct LedgerStore;

impl LedgerStore {
    /// Serialize a ledger to document JSON bytes.
    pub fn save_to_bytes(ledger: &Ledger) -> Result<Vec<u8>, CoreError> {
        let document = ExportDocument::from_ledger(ledger);
        Ok(document.to_json()?.into_bytes())
    }

    /// Parse and validate a ledger from document JSON bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Ledger, CoreError> {
        let json = std::str::from_utf8(data)
            .map_err(|e| CoreError::Deserialization(format!("File is not valid UTF-8: {e}")))?;
        let document = ExportDocument::from_json(json)?;
        Ok(document.into_ledger())
    }

    /// Save a ledger to a file on disk, atomically.
    pub fn save_to_file(ledger: &Ledger, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = path.as_ref();
        let bytes = Self::save_to_bytes(ledger)?;

        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, &bytes)?;
        if let Err(e) = std::fs::rename(&tmp_path, path) {
            // Best effort; the rename error is the one worth reporting
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!("saved ledger ({} bytes) to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Load a ledger from a file on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Ledger, CoreError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        debug!("loading ledger ({} bytes) from {}", bytes.len(), path.display());
        Self::load_from_bytes(&bytes)
    }
}
