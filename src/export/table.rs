//! Generic tabular export
//!
//! Converts an ordered sequence of flat label→value records into a
//! spreadsheet artifact. Column inference and row construction are
//! format-agnostic; only the final encode step branches on format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::{OpsError, OpsResult};

/// Width applied to every column of an XLSX sheet, in character units
const XLSX_COLUMN_WIDTH: f64 = 20.0;

/// One flat export record: ordered (label, value) pairs
pub type ExportRecord = Vec<(String, String)>;

/// Target spreadsheet format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Format-agnostic tabular form of a record sequence
///
/// The first record's labels define the column set and order. Later
/// records missing a label yield an empty cell; labels not present in
/// the first record are dropped.
#[derive(Debug, Clone)]
pub struct ExportTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Build a table from records, inferring columns from the first record
    ///
    /// Fails fast when the sequence is empty: no artifact is ever produced
    /// for an empty input.
    pub fn from_records(records: &[ExportRecord]) -> OpsResult<Self> {
        let first = records
            .first()
            .ok_or_else(|| OpsError::Export("No data to export".into()))?;

        let columns: Vec<String> = first.iter().map(|(label, _)| label.clone()).collect();

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        record
                            .iter()
                            .find(|(label, _)| label == column)
                            .map(|(_, value)| value.clone())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Column headers, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, in input order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Encode as CSV (header row first, RFC-4180 quoting)
    pub fn write_csv<W: Write>(&self, writer: W) -> OpsResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }

        csv_writer
            .flush()
            .map_err(|e| OpsError::Export(format!("Failed to flush CSV output: {}", e)))?;

        Ok(())
    }

    /// Encode as a one-sheet XLSX workbook at the given path
    ///
    /// Headers are written as plain strings and every column is set to a
    /// fixed 20-character width.
    pub fn write_xlsx(&self, path: &Path, sheet_name: &str) -> OpsResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, header) in self.columns.iter().enumerate() {
            worksheet.write_string(0, col as u16, header.as_str())?;
            worksheet.set_column_width(col as u16, XLSX_COLUMN_WIDTH)?;
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                worksheet.write_string((row_idx + 1) as u32, col as u16, cell.as_str())?;
            }
        }

        workbook.save(path)?;
        Ok(())
    }

    /// Write the table to a file in the given format
    pub fn write_to_file(&self, path: &Path, format: ExportFormat, sheet_name: &str) -> OpsResult<()> {
        match format {
            ExportFormat::Csv => {
                let file = File::create(path).map_err(|e| {
                    OpsError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                self.write_csv(BufWriter::new(file))
            }
            ExportFormat::Xlsx => self.write_xlsx(path, sheet_name),
        }
    }
}
