//! Customer repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OpsError;
use crate::models::{Customer, CustomerId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable customer data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CustomerData {
    customers: Vec<Customer>,
}

/// Repository for customer persistence
pub struct CustomerRepository {
    path: PathBuf,
    data: RwLock<HashMap<CustomerId, Customer>>,
}

impl CustomerRepository {
    /// Create a new customer repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load customers from disk
    pub fn load(&self) -> Result<(), OpsError> {
        let file_data: CustomerData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for customer in file_data.customers {
            data.insert(customer.id, customer);
        }

        Ok(())
    }

    /// Save customers to disk
    pub fn save(&self) -> Result<(), OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut customers: Vec<_> = data.values().cloned().collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = CustomerData { customers };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a customer by ID
    pub fn get(&self, id: CustomerId) -> Result<Option<Customer>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all customers, sorted by name
    pub fn get_all(&self) -> Result<Vec<Customer>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut customers: Vec<_> = data.values().cloned().collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    /// Get a customer by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Customer>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a customer
    pub fn upsert(&self, customer: Customer) -> Result<(), OpsError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(customer.id, customer);
        Ok(())
    }

    /// Delete a customer
    pub fn delete(&self, id: CustomerId) -> Result<bool, OpsError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count customers
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

    fn create_test_repo() -> (TempDir, CustomerRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("customers.json");
        let repo = CustomerRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_and_get_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let customer = Customer::new("Corner Dairy");
        repo.upsert(customer.clone()).unwrap();

        let found = repo.get_by_name("corner dairy").unwrap().unwrap();
        assert_eq!(found.id, customer.id);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let customer = Customer::new("Corner Dairy");
        let id = customer.id;
        repo.upsert(customer).unwrap();
        repo.save().unwrap();

        let repo2 = CustomerRepository::new(temp_dir.path().join("customers.json"));
        repo2.load().unwrap();
        assert!(repo2.get(id).unwrap().is_some());
    }
}
