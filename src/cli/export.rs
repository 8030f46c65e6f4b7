//! CLI commands for data export
//!
//! Maps each entity family through its adapter and hands the resulting
//! records to the generic exporter.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use log::error;

use crate::config::{DefaultExportFormat, Settings};
use crate::error::OpsResult;
use crate::export::{adapters, ExportFormat, ExportTable};
use crate::storage::Storage;

/// Exportable entity families
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportEntity {
    Orders,
    Products,
    Customers,
    Allocations,
    DriverSales,
    Users,
    Suppliers,
}

impl ExportEntity {
    /// Filename prefix for this entity family
    fn prefix(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Allocations => "driver_allocations",
            Self::DriverSales => "driver_sales",
            Self::Users => "users",
            Self::Suppliers => "suppliers",
        }
    }

    /// Sheet name for this entity family
    fn sheet_name(&self) -> &'static str {
        match self {
            Self::Orders => "Orders",
            Self::Products => "Products",
            Self::Customers => "Customers",
            Self::Allocations => "Driver Allocations",
            Self::DriverSales => "Driver Sales",
            Self::Users => "Users",
            Self::Suppliers => "Suppliers",
        }
    }
}

/// Format options on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Which entity family to export
    #[arg(value_enum)]
    pub entity: ExportEntity,

    /// Spreadsheet format (defaults to the configured preference)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Output directory (defaults to the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> OpsResult<()> {
    let format = match args.format {
        Some(arg) => arg.into(),
        None => match settings.export_format {
            DefaultExportFormat::Csv => ExportFormat::Csv,
            DefaultExportFormat::Xlsx => ExportFormat::Xlsx,
        },
    };

    let records = match args.entity {
        ExportEntity::Orders => adapters::orders(&storage.orders.get_all()?),
        ExportEntity::Products => adapters::products(&storage.products.get_all()?),
        ExportEntity::Customers => adapters::customers(&storage.customers.get_all()?),
        ExportEntity::Allocations => {
            adapters::allocations(&storage.allocations.get_all_allocations()?)
        }
        ExportEntity::DriverSales => {
            adapters::driver_sales(&storage.allocations.get_all_sales()?)
        }
        ExportEntity::Users => adapters::users(&storage.users.get_all()?),
        ExportEntity::Suppliers => adapters::suppliers(&storage.suppliers.get_all()?),
    };

    // Fails fast on an empty sequence; no artifact is produced
    let table = ExportTable::from_records(&records)?;

    let output_dir = args
        .output
        .unwrap_or_else(|| storage.paths().export_dir());
    let path = output_dir.join(adapters::dated_filename(args.entity.prefix(), format));

    if let Err(e) = table.write_to_file(&path, format, args.entity.sheet_name()) {
        error!("export of {:?} to {} failed: {}", args.entity, path.display(), e);
        return Err(e);
    }

    println!(
        "Exported {} {} rows to: {}",
        table.row_count(),
        args.entity.prefix(),
        path.display()
    );

    Ok(())
}
