//! Per-entity export adapters
//!
//! Each adapter maps one domain entity list to flat label→value records
//! with fixed column labels, defaulting absent optional fields to empty
//! string or zero. The date-stamped filename is also an adapter-side
//! concern; the generic table knows nothing about naming.

use chrono::Local;

use crate::models::{Customer, DriverAllocation, DriverSale, Order, Product, Supplier, User};

use super::table::{ExportFormat, ExportRecord};

/// Build the conventional artifact name: `{prefix}_{yyyy-mm-dd}.{ext}`
pub fn dated_filename(prefix: &str, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        Local::now().date_naive().format("%Y-%m-%d"),
        format.extension()
    )
}

fn pair(label: &str, value: impl Into<String>) -> (String, String) {
    (label.to_string(), value.into())
}

/// Orders → export records
pub fn orders(orders: &[Order]) -> Vec<ExportRecord> {
    orders
        .iter()
        .map(|order| {
            let items = order
                .items
                .iter()
                .map(|i| format!("{} x{}", i.product_name, i.quantity))
                .collect::<Vec<_>>()
                .join("; ");

            vec![
                pair("Order ID", order.id.to_string()),
                pair("Date", order.date.to_string()),
                pair("Customer", order.customer_name.clone()),
                pair("Total", order.total.to_decimal_string()),
                pair("Status", order.status.to_string()),
                pair(
                    "Payment Method",
                    order
                        .payment_method
                        .map(|m| m.to_string())
                        .unwrap_or_default(),
                ),
                pair("Items", items),
                pair("Credit Balance", order.credit_balance.to_decimal_string()),
                pair("Cheque Balance", order.cheque_balance.to_decimal_string()),
                pair("Notes", order.notes.clone()),
            ]
        })
        .collect()
}

/// Products → export records
pub fn products(products: &[Product]) -> Vec<ExportRecord> {
    products
        .iter()
        .map(|product| {
            vec![
                pair("Product ID", product.id.to_string()),
                pair("Name", product.name.clone()),
                pair("Unit Price", product.unit_price.to_decimal_string()),
                pair("Stock", product.stock.to_string()),
                pair(
                    "Supplier ID",
                    product
                        .supplier_id
                        .map(|id| id.to_string())
                        .unwrap_or_default(),
                ),
            ]
        })
        .collect()
}

/// Customers → export records
pub fn customers(customers: &[Customer]) -> Vec<ExportRecord> {
    customers
        .iter()
        .map(|customer| {
            vec![
                pair("Customer ID", customer.id.to_string()),
                pair("Name", customer.name.clone()),
                pair("Phone", customer.phone.clone().unwrap_or_default()),
                pair(
                    "Outstanding Balance",
                    customer.outstanding_balance.to_decimal_string(),
                ),
            ]
        })
        .collect()
}

/// Driver allocations → export records
pub fn allocations(allocations: &[DriverAllocation]) -> Vec<ExportRecord> {
    allocations
        .iter()
        .map(|allocation| {
            let items = allocation
                .items
                .iter()
                .map(|i| format!("{} x{}", i.product_name, i.quantity))
                .collect::<Vec<_>>()
                .join("; ");

            vec![
                pair("Allocation ID", allocation.id.to_string()),
                pair("Driver ID", allocation.driver_id.to_string()),
                pair("Date", allocation.date.to_string()),
                pair("Total Units", allocation.total_units().to_string()),
                pair("Items", items),
                pair("Notes", allocation.notes.clone()),
            ]
        })
        .collect()
}

/// Driver sales → export records
pub fn driver_sales(sales: &[DriverSale]) -> Vec<ExportRecord> {
    sales
        .iter()
        .map(|sale| {
            vec![
                pair("Sale ID", sale.id.to_string()),
                pair("Driver ID", sale.driver_id.to_string()),
                pair("Date", sale.date.to_string()),
                pair("Amount", sale.amount.to_decimal_string()),
                pair(
                    "Payment Method",
                    sale.payment_method
                        .map(|m| m.to_string())
                        .unwrap_or_default(),
                ),
                pair("Customer", sale.customer_name.clone().unwrap_or_default()),
            ]
        })
        .collect()
}

/// Users → export records
pub fn users(users: &[User]) -> Vec<ExportRecord> {
    users
        .iter()
        .map(|user| {
            vec![
                pair("User ID", user.id.to_string()),
                pair("Name", user.name.clone()),
                pair("Email", user.email.clone()),
                pair("Role", user.role.to_string()),
                pair("Active", user.active.to_string()),
            ]
        })
        .collect()
}

/// Suppliers → export records
pub fn suppliers(suppliers: &[Supplier]) -> Vec<ExportRecord> {
    suppliers
        .iter()
        .map(|supplier| {
            vec![
                pair("Supplier ID", supplier.id.to_string()),
                pair("Name", supplier.name.clone()),
                pair(
                    "Contact Person",
                    supplier.contact_person.clone().unwrap_or_default(),
                ),
                pair("Phone", supplier.phone.clone().unwrap_or_default()),
            ]
        })
        .collect()
}
