//! Supplier repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OpsError;
use crate::models::{Supplier, SupplierId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable supplier data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SupplierData {
    suppliers: Vec<Supplier>,
}

/// Repository for supplier persistence
pub struct SupplierRepository {
    path: PathBuf,
    data: RwLock<HashMap<SupplierId, Supplier>>,
}

impl SupplierRepository {
    /// Create a new supplier repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load suppliers from disk
    pub fn load(&self) -> Result<(), OpsError> {
        let file_data: SupplierData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for supplier in file_data.suppliers {
            data.insert(supplier.id, supplier);
        }

        Ok(())
    }

    /// Save suppliers to disk
    pub fn save(&self) -> Result<(), OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut suppliers: Vec<_> = data.values().cloned().collect();
        suppliers.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = SupplierData { suppliers };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a supplier by ID
    pub fn get(&self, id: SupplierId) -> Result<Option<Supplier>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all suppliers, sorted by name
    pub fn get_all(&self) -> Result<Vec<Supplier>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut suppliers: Vec<_> = data.values().cloned().collect();
        suppliers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(suppliers)
    }

    /// Insert or update a supplier
    pub fn upsert(&self, supplier: Supplier) -> Result<(), OpsError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(supplier.id, supplier);
        Ok(())
    }

    /// Count suppliers
    pub fn count(&self) -> Result<usize, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("suppliers.json");

        let repo = SupplierRepository::new(path.clone());
        repo.load().unwrap();
        let supplier = Supplier::new("Valley Farms");
        let id = supplier.id;
        repo.upsert(supplier).unwrap();
        repo.save().unwrap();

        let repo2 = SupplierRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().name, "Valley Farms");
    }
}
