//! Storage layer for opsdesk
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the completion ledger and audit log wiring.

pub mod allocations;
pub mod customers;
pub mod file_io;
pub mod init;
pub mod ledger;
pub mod orders;
pub mod products;
pub mod suppliers;
pub mod users;

pub use allocations::AllocationRepository;
pub use customers::CustomerRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use ledger::CompletionLedger;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use suppliers::SupplierRepository;
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::OpsPaths;
use crate::error::OpsError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: OpsPaths,
    audit: AuditLogger,
    pub orders: OrderRepository,
    pub customers: CustomerRepository,
    pub users: UserRepository,
    pub products: ProductRepository,
    pub suppliers: SupplierRepository,
    pub allocations: AllocationRepository,
    pub ledger: CompletionLedger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: OpsPaths) -> Result<Self, OpsError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            orders: OrderRepository::new(paths.orders_file()),
            customers: CustomerRepository::new(paths.customers_file()),
            users: UserRepository::new(paths.users_file()),
            products: ProductRepository::new(paths.products_file()),
            suppliers: SupplierRepository::new(paths.suppliers_file()),
            allocations: AllocationRepository::new(paths.allocations_file()),
            ledger: CompletionLedger::new(paths.completion_ledger_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &OpsPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), OpsError> {
        self.orders.load()?;
        self.customers.load()?;
        self.users.load()?;
        self.products.load()?;
        self.suppliers.load()?;
        self.allocations.load()?;
        self.ledger.load()?;
        Ok(())
    }

    /// Reload the collections join inputs from the authoritative files
    ///
    /// Recognition triggers this after its writes so the in-memory view
    /// reconciles with whatever actually landed on disk.
    pub fn reload_collections_inputs(&self) -> Result<(), OpsError> {
        self.orders.load()?;
        self.customers.load()?;
        self.users.load()?;
        self.ledger.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), OpsError> {
        self.orders.save()?;
        self.customers.save()?;
        self.users.save()?;
        self.products.save()?;
        self.suppliers.save()?;
        self.allocations.save()?;
        self.ledger.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (has any data)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }

    /// Write a create entry to the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), OpsError> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }

    /// Write an update entry to the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), OpsError> {
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff_summary);
        self.audit.log(&entry)
    }

    /// Access the audit logger directly
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OpsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("exports").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_all_on_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OpsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        storage.load_all().unwrap();
        assert_eq!(storage.orders.count().unwrap(), 0);
        assert_eq!(storage.ledger.count().unwrap(), 0);
    }
}
