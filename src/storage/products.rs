//! Product repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OpsError;
use crate::models::{Product, ProductId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable product data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProductData {
    products: Vec<Product>,
}

/// Repository for product persistence
pub struct ProductRepository {
    path: PathBuf,
    data: RwLock<HashMap<ProductId, Product>>,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load products from disk
    pub fn load(&self) -> Result<(), OpsError> {
        let file_data: ProductData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for product in file_data.products {
            data.insert(product.id, product);
        }

        Ok(())
    }

    /// Save products to disk
    pub fn save(&self) -> Result<(), OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut products: Vec<_> = data.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = ProductData { products };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a product by ID
    pub fn get(&self, id: ProductId) -> Result<Option<Product>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all products, sorted by name
    pub fn get_all(&self) -> Result<Vec<Product>, OpsError> {
        let data = self
            .data
            .read()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut products: Vec<_> = data.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    /// Insert or update a product
    pub fn upsert(&self, product: Product) -> Result<(), OpsError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OpsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(product.id, product);
        Ok(())
    }

    /// Count products
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
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.json");

        let repo = ProductRepository::new(path.clone());
        repo.load().unwrap();
        let product = Product::new("Milk 2L", Money::from_cents(350));
        let id = product.id;
        repo.upsert(product).unwrap();
        repo.save().unwrap();

        let repo2 = ProductRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().name, "Milk 2L");
    }
}
