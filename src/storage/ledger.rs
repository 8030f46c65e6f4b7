//! Completion ledger for recognized collections
//!
//! A small, schema-versioned JSON document holding the ids of every
//! collection obligation that has been recognized. Ledger membership is
//! authoritative for "already recognized": the append happens before any
//! balance write, so derivation stays correct even when the order store
//! has not caught up.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::OpsError;
use crate::models::CollectionId;

use super::file_io::{read_json, write_json_atomic};

const LEDGER_SCHEMA_VERSION: u32 = 1;

/// Serializable ledger document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerData {
    schema_version: u32,
    recognized: Vec<CollectionId>,
}

impl Default for LedgerData {
    fn default() -> Self {
        Self {
            schema_version: LEDGER_SCHEMA_VERSION,
            recognized: Vec::new(),
        }
    }
}

/// Persistent set of recognized collection ids
pub struct CompletionLedger {
    path: PathBuf,
    recognized: RwLock<HashSet<CollectionId>>,
}

impl CompletionLedger {
    /// Create a new completion ledger
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            recognized: RwLock::new(HashSet::new()),
        }
    }

    /// Load the ledger from disk
    ///
    /// A missing file is an empty ledger; a corrupt or future-versioned
    /// file is a storage error rather than silently dropped state.
    pub fn load(&self) -> Result<(), OpsError> {
        let file_data: LedgerData = read_json(&self.path)?;

        if file_data.schema_version > LEDGER_SCHEMA_VERSION {
            return Err(OpsError::Storage(format!(
                "Completion ledger schema version {} is newer than supported version {}",
                file_data.schema_version, LEDGER_SCHEMA_VERSION
            )));
        }

        let mut recognized = self
            .recognized
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        recognized.clear();
        recognized.extend(file_data.recognized);

        Ok(())
    }

    /// Save the ledger to disk
    pub fn save(&self) -> Result<(), OpsError> {
        let recognized = self
            .recognized
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut ids: Vec<_> = recognized.iter().copied().collect();
        ids.sort();

        let file_data = LedgerData {
            schema_version: LEDGER_SCHEMA_VERSION,
            recognized: ids,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Check whether an id has been recognized
    pub fn contains(&self, id: CollectionId) -> Result<bool, OpsError> {
        let recognized = self
            .recognized
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(recognized.contains(&id))
    }

    /// Get all recognized ids
    pub fn ids(&self) -> Result<HashSet<CollectionId>, OpsError> {
        let recognized = self
            .recognized
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(recognized.clone())
    }

    /// Append an id if it is not already present, persisting immediately
    ///
    /// Returns true if the id was newly added. Re-appending an existing id
    /// is a no-op, which is what makes recognition idempotent.
    pub fn append(&self, id: CollectionId) -> Result<bool, OpsError> {
        let added = {
            let mut recognized = self
                .recognized
                .write()
                .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;
            recognized.insert(id)
        };

        if added {
            self.save()?;
        }

        Ok(added)
    }

    /// Count recognized ids
    pub fn count(&self) -> Result<usize, OpsError> {
        let recognized = self
            .recognized
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(recognized.len())
    }
}
