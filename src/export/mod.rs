//! Export module for opsdesk
//!
//! Provides spreadsheet export in two formats sharing one
//! format-agnostic row-construction step:
//! - CSV: RFC-4180, UTF-8, header row from the first record's labels
//! - XLSX: one plain-headed sheet with fixed 20-unit column widths

pub mod adapters;
pub mod table;

pub use table::{ExportFormat, ExportRecord, ExportTable};
