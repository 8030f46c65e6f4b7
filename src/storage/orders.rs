//! Order repository for JSON storage
//!
//! Manages loading and saving orders to orders.json with a customer index.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OpsError;
use crate::models::{CustomerId, Order, OrderId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable order data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct OrderData {
    orders: Vec<Order>,
}

/// Repository for order persistence with indexing
pub struct OrderRepository {
    path: PathBuf,
    data: RwLock<HashMap<OrderId, Order>>,
    /// Index: customer_id -> order_ids
    by_customer: RwLock<HashMap<CustomerId, Vec<OrderId>>>,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_customer: RwLock::new(HashMap::new()),
        }
    }

    /// Load orders from disk and build indexes
    pub fn load(&self) -> Result<(), OpsError> {
        let file_data: OrderData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_customer = self
            .by_customer
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_customer.clear();

        for order in file_data.orders {
            by_customer.entry(order.customer_id).or_default().push(order.id);
            data.insert(order.id, order);
        }

        Ok(())
    }

    /// Save orders to disk
    pub fn save(&self) -> Result<(), OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut orders: Vec<_> = data.values().cloned().collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        let file_data = OrderData { orders };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an order by ID
    pub fn get(&self, id: OrderId) -> Result<Option<Order>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all orders, most recent first
    pub fn get_all(&self) -> Result<Vec<Order>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut orders: Vec<_> = data.values().cloned().collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    /// Get orders for a customer
    pub fn get_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_customer = self
            .by_customer
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_customer
            .get(&customer_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut orders: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    /// Insert or update an order
    pub fn upsert(&self, order: Order) -> Result<(), OpsError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_customer = self
            .by_customer
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from old index if the order moved to another customer
        if let Some(old) = data.get(&order.id) {
            if old.customer_id != order.customer_id {
                if let Some(ids) = by_customer.get_mut(&old.customer_id) {
                    ids.retain(|&id| id != order.id);
                }
            }
        }

        let entry = by_customer.entry(order.customer_id).or_default();
        if !entry.contains(&order.id) {
            entry.push(order.id);
        }

        data.insert(order.id, order);
        Ok(())
    }

    /// Delete an order
    pub fn delete(&self, id: OrderId) -> Result<bool, OpsError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_customer = self
            .by_customer
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(order) = data.remove(&id) {
            if let Some(ids) = by_customer.get_mut(&order.customer_id) {
                ids.retain(|&oid| oid != id);
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count orders
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
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, OrderRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("orders.json");
        let repo = OrderRepository::new(path);
        (temp_dir, repo)
    }

    fn sample_order(customer_id: CustomerId, day: u32, cents: i64) -> Order {
        Order::new(
            customer_id,
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let order = sample_order(CustomerId::new(), 10, 5000);
        let id = order.id;
        repo.upsert(order).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.total.cents(), 5000);
    }

    #[test]
    fn test_get_by_customer() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let customer1 = CustomerId::new();
        let customer2 = CustomerId::new();

        repo.upsert(sample_order(customer1, 10, 100)).unwrap();
        repo.upsert(sample_order(customer1, 11, 200)).unwrap();
        repo.upsert(sample_order(customer2, 12, 300)).unwrap();

        assert_eq!(repo.get_by_customer(customer1).unwrap().len(), 2);
        assert_eq!(repo.get_by_customer(customer2).unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_same_order_does_not_duplicate_index() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let customer = CustomerId::new();
        let order = sample_order(customer, 10, 100);
        repo.upsert(order.clone()).unwrap();
        repo.upsert(order).unwrap();

        assert_eq!(repo.get_by_customer(customer).unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let order = sample_order(CustomerId::new(), 10, 5000);
        let id = order.id;
        repo.upsert(order).unwrap();
        repo.save().unwrap();

        let path = temp_dir.path().join("orders.json");
        let repo2 = OrderRepository::new(path);
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.total.cents(), 5000);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let customer = CustomerId::new();
        let order = sample_order(customer, 10, 5000);
        let id = order.id;

        repo.upsert(order).unwrap();
        assert_eq!(repo.count().unwrap(), 1);

        assert!(repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_by_customer(customer).unwrap().is_empty());
    }
}
