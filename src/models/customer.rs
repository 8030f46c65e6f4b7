//! Customer model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CustomerId;
use super::money::Money;

/// A customer of the business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,

    /// Customer or shop name
    pub name: String,

    /// Contact phone number
    pub phone: Option<String>,

    /// Total amount currently owed across all orders
    #[serde(default)]
    pub outstanding_balance: Money,

    /// When the customer was created
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new customer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            phone: None,
            outstanding_balance: Money::zero(),
            created_at: Utc::now(),
        }
    }

    /// Validate customer invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Customer name cannot be empty".into());
        }
        if self.outstanding_balance.is_negative() {
            return Err("Outstanding balance cannot be negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer() {
        let customer = Customer::new("Corner Dairy");
        assert_eq!(customer.name, "Corner Dairy");
        assert!(customer.outstanding_balance.is_zero());
        assert!(customer.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let mut customer = Customer::new("  ");
        assert!(customer.validate().is_err());
        customer.name = "Corner Dairy".into();
        assert!(customer.validate().is_ok());
    }
}
