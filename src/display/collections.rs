//! Collection worklist display formatting
//!
//! Formats derived collection records and their aggregate statistics for
//! terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::CollectionRecord;
use crate::services::CollectionStats;

#[derive(Tabled)]
struct CollectionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Type")]
    collection_type: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Collected By")]
    collected_by: String,
    #[tabled(rename = "Collection ID")]
    id: String,
}

/// Format a list of collection records as a table
pub fn format_collection_list(records: &[CollectionRecord]) -> String {
    if records.is_empty() {
        return "No collections found.".to_string();
    }

    let rows: Vec<CollectionRow> = records
        .iter()
        .map(|record| CollectionRow {
            date: record.collected_at.to_string(),
            customer: record.customer_name.clone(),
            collection_type: record.collection_type.to_string(),
            amount: record.amount.to_string(),
            status: record.status.to_string(),
            collected_by: record.collected_by.clone(),
            id: record.id.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Format aggregate statistics for terminal output
pub fn format_stats(stats: &CollectionStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("Records:          {}\n", stats.record_count));
    output.push_str(&format!("Pending total:    {}\n", stats.pending_total));
    output.push_str(&format!("  Credit:         {}\n", stats.pending_credit));
    output.push_str(&format!("  Cheque:         {}\n", stats.pending_cheque));
    output.push_str(&format!("Completed total:  {}", stats.complete_total));
    output
}
