//! Product model

use serde::{Deserialize, Serialize};

use super::ids::{ProductId, SupplierId};
use super::money::Money;

/// A product the business stocks and sells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Current selling price per unit
    pub unit_price: Money,

    /// Units currently on hand
    #[serde(default)]
    pub stock: u32,

    /// Supplier this product is sourced from, if tracked
    pub supplier_id: Option<SupplierId>,
}

impl Product {
    /// Create a new product
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            unit_price,
            stock: 0,
            supplier_id: None,
        }
    }
}
