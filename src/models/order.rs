//! Order model
//!
//! Represents customer orders with line items, delivery status, payment
//! method, and the per-order credit/cheque balances the collections
//! workflow settles.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CustomerId, OrderId, ProductId, UserId};
use super::money::Money;

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order has been taken but not yet processed
    #[default]
    Pending,
    /// Order is being prepared or is out for delivery
    Processing,
    /// Order has been delivered
    Delivered,
    /// Order was cancelled
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Processing => write!(f, "Processing"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// How an order was (or will be) paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Credit,
    Cheque,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Credit => write!(f, "Credit"),
            Self::Cheque => write!(f, "Cheque"),
        }
    }
}

/// One product line on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,

    /// Product name captured at order time, kept for display even if the
    /// product is later renamed or removed
    #[serde(default)]
    pub product_name: String,

    pub quantity: u32,

    pub unit_price: Money,
}

impl OrderItem {
    pub fn new(product_id: ProductId, product_name: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    /// Line total (quantity x unit price)
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price.cents() * self.quantity as i64)
    }
}

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,

    /// The customer this order belongs to
    pub customer_id: CustomerId,

    /// Customer name captured at order time (denormalized for display)
    #[serde(default)]
    pub customer_name: String,

    /// Business date of the order
    pub date: NaiveDate,

    /// Order total
    pub total: Money,

    /// Lifecycle status
    #[serde(default)]
    pub status: OrderStatus,

    /// Payment method, if known
    pub payment_method: Option<PaymentMethod>,

    /// Product lines
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// The user (usually a driver) responsible for the order
    pub assigned_user_id: Option<UserId>,

    /// Amount still owed by cheque on this order
    #[serde(default)]
    pub cheque_balance: Money,

    /// Amount still owed on credit on this order
    #[serde(default)]
    pub credit_balance: Money,

    /// Free-text notes; collection recognition appends audit lines here
    #[serde(default)]
    pub notes: String,

    /// When the order was created
    pub created_at: DateTime<Utc>,

    /// When the order was last modified
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order
    pub fn new(customer_id: CustomerId, date: NaiveDate, total: Money) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            customer_id,
            customer_name: String::new(),
            date,
            total,
            status: OrderStatus::Pending,
            payment_method: None,
            items: Vec::new(),
            assigned_user_id: None,
            cheque_balance: Money::zero(),
            credit_balance: Money::zero(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether any credit amount is still owed on this order
    pub fn has_credit_balance(&self) -> bool {
        self.credit_balance.is_positive()
    }

    /// Whether any cheque amount is still owed on this order
    pub fn has_cheque_balance(&self) -> bool {
        self.cheque_balance.is_positive()
    }

    /// Append a line to the order's notes, preserving existing content
    pub fn append_note(&mut self, line: &str) {
        if self.notes.is_empty() {
            self.notes = line.to_string();
        } else {
            self.notes.push('\n');
            self.notes.push_str(line);
        }
        self.touch();
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate order invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.total.is_negative() {
            return Err("Order total cannot be negative".into());
        }
        if self.credit_balance.is_negative() {
            return Err("Credit balance cannot be negative".into());
        }
        if self.cheque_balance.is_negative() {
            return Err("Cheque balance cannot be negative".into());
        }
        for item in &self.items {
            if item.quantity == 0 {
                return Err(format!(
                    "Order item '{}' has zero quantity",
                    item.product_name
                ));
            }
        }
        Ok(())
    }
}
