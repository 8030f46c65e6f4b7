//! Driver allocation and sale repository for JSON storage
//!
//! Allocations and the sales recorded against them share one document,
//! allocations.json, since both are keyed by driver and route date.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OpsError;
use crate::models::{AllocationId, DriverAllocation, DriverSale, SaleId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable allocation data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AllocationData {
    allocations: Vec<DriverAllocation>,
    #[serde(default)]
    sales: Vec<DriverSale>,
}

/// Repository for driver allocations and driver sales
pub struct AllocationRepository {
    path: PathBuf,
    allocations: RwLock<HashMap<AllocationId, DriverAllocation>>,
    sales: RwLock<HashMap<SaleId, DriverSale>>,
}

impl AllocationRepository {
    /// Create a new allocation repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            allocations: RwLock::new(HashMap::new()),
            sales: RwLock::new(HashMap::new()),
        }
    }

    /// Load allocations and sales from disk
    pub fn load(&self) -> Result<(), OpsError> {
        let file_data: AllocationData = read_json(&self.path)?;

        let mut allocations = self
            .allocations
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut sales = self
            .sales
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        allocations.clear();
        sales.clear();

        for allocation in file_data.allocations {
            allocations.insert(allocation.id, allocation);
        }
        for sale in file_data.sales {
            sales.insert(sale.id, sale);
        }

        Ok(())
    }

    /// Save allocations and sales to disk
    pub fn save(&self) -> Result<(), OpsError> {
        let allocations = self
            .allocations
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let sales = self
            .sales
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut allocation_list: Vec<_> = allocations.values().cloned().collect();
        allocation_list.sort_by(|a, b| b.date.cmp(&a.date));

        let mut sale_list: Vec<_> = sales.values().cloned().collect();
        sale_list.sort_by(|a, b| b.date.cmp(&a.date));

        let file_data = AllocationData {
            allocations: allocation_list,
            sales: sale_list,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get all allocations, most recent first
    pub fn get_all_allocations(&self) -> Result<Vec<DriverAllocation>, OpsError> {
        let allocations = self
            .allocations
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = allocations.values().cloned().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(list)
    }

    /// Get all sales, most recent first
    pub fn get_all_sales(&self) -> Result<Vec<DriverSale>, OpsError> {
        let sales = self
            .sales
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = sales.values().cloned().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(list)
    }

    /// Get allocations for a driver
    pub fn get_allocations_by_driver(
        &self,
        driver_id: UserId,
    ) -> Result<Vec<DriverAllocation>, OpsError> {
        let all = self.get_all_allocations()?;
        Ok(all.into_iter().filter(|a| a.driver_id == driver_id).collect())
    }

    /// Insert or update an allocation
    pub fn upsert_allocation(&self, allocation: DriverAllocation) -> Result<(), OpsError> {
        let mut allocations = self
            .allocations
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        allocations.insert(allocation.id, allocation);
        Ok(())
    }

    /// Insert or update a sale
    pub fn upsert_sale(&self, sale: DriverSale) -> Result<(), OpsError> {
        let mut sales = self
            .sales
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        sales.insert(sale.id, sale);
        Ok(())
    }
}
