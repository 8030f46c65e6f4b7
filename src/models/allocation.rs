//! Driver allocation and driver sale models
//!
//! An allocation records the stock handed to a driver at the start of a
//! route; a sale records what the driver sold along it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{AllocationId, ProductId, SaleId, UserId};
use super::money::Money;
use super::order::PaymentMethod;

/// One product line on a driver allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationItem {
    pub product_id: ProductId,

    /// Product name captured at allocation time
    #[serde(default)]
    pub product_name: String,

    pub quantity: u32,
}

/// Stock handed to a driver for a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverAllocation {
    /// Unique identifier
    pub id: AllocationId,

    /// The driver receiving the stock
    pub driver_id: UserId,

    /// Route date
    pub date: NaiveDate,

    /// Allocated product lines
    #[serde(default)]
    pub items: Vec<AllocationItem>,

    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}

impl DriverAllocation {
    /// Create a new empty allocation for a driver
    pub fn new(driver_id: UserId, date: NaiveDate) -> Self {
        Self {
            id: AllocationId::new(),
            driver_id,
            date,
            items: Vec::new(),
            notes: String::new(),
        }
    }

    /// Total units allocated across all lines
    pub fn total_units(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// A sale recorded by a driver on a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverSale {
    /// Unique identifier
    pub id: SaleId,

    /// The driver who made the sale
    pub driver_id: UserId,

    /// Sale date
    pub date: NaiveDate,

    /// Sale amount
    pub amount: Money,

    /// How the sale was paid
    pub payment_method: Option<PaymentMethod>,

    /// Customer name, when the sale was to a known customer
    pub customer_name: Option<String>,
}

impl DriverSale {
    /// Create a new driver sale
    pub fn new(driver_id: UserId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: SaleId::new(),
            driver_id,
            date,
            amount,
            payment_method: None,
            customer_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_total_units() {
        let mut allocation = DriverAllocation::new(
            UserId::new(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        );
        allocation.items.push(AllocationItem {
            product_id: ProductId::new(),
            product_name: "Milk 2L".into(),
            quantity: 24,
        });
        allocation.items.push(AllocationItem {
            product_id: ProductId::new(),
            product_name: "Bread".into(),
            quantity: 12,
        });
        assert_eq!(allocation.total_units(), 36);
    }

    #[test]
    fn test_new_sale() {
        let sale = DriverSale::new(
            UserId::new(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            Money::from_cents(4500),
        );
        assert_eq!(sale.amount.cents(), 4500);
        assert!(sale.payment_method.is_none());
    }
}
