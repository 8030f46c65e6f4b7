//! CLI commands for the collections workflow
//!
//! Bridges clap argument parsing with the collections service: listing the
//! derived worklist, aggregate stats, and recognizing an obligation.

use clap::{Subcommand, ValueEnum};
use log::error;

use crate::config::Settings;
use crate::display::{format_collection_list, format_stats};
use crate::error::{OpsError, OpsResult};
use crate::models::{CollectionId, CollectionStatus, CollectionType, User};
use crate::services::{CollectionFilter, CollectionsService};
use crate::storage::Storage;

/// Status filter values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Complete,
}

impl From<StatusArg> for CollectionStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => CollectionStatus::Pending,
            StatusArg::Complete => CollectionStatus::Complete,
        }
    }
}

/// Type filter values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TypeArg {
    Credit,
    Cheque,
}

impl From<TypeArg> for CollectionType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Credit => CollectionType::Credit,
            TypeArg::Cheque => CollectionType::Cheque,
        }
    }
}

/// Collections subcommands
#[derive(Subcommand, Debug)]
pub enum CollectionsCommands {
    /// List the derived collections worklist
    List {
        /// Filter by status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Filter by collection type
        #[arg(short = 't', long = "type", value_enum)]
        collection_type: Option<TypeArg>,
    },

    /// Show aggregate totals for the (filtered) worklist
    Stats {
        /// Filter by status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Filter by collection type
        #[arg(short = 't', long = "type", value_enum)]
        collection_type: Option<TypeArg>,
    },

    /// Recognize a pending collection as collected
    Recognize {
        /// Collection id (`{order-uuid}-credit` or `{order-uuid}-cheque`)
        id: String,

        /// Verification notes recorded with the collection
        #[arg(short, long)]
        notes: Option<String>,
    },
}

/// Handle collections commands
pub fn handle_collections_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CollectionsCommands,
    acting_as: Option<String>,
) -> OpsResult<()> {
    let operator = resolve_operator(storage, settings, acting_as)?;
    let service = CollectionsService::new(storage);

    // The whole workflow is gated; unprivileged roles get a static denial
    // and no derivation runs for them
    if service.ensure_operator(&operator).is_err() {
        println!("Collections are restricted to admin and manager accounts.");
        return Ok(());
    }

    match cmd {
        CollectionsCommands::List {
            status,
            collection_type,
        } => {
            let records = service.derive(Some(&operator))?;
            let filtered = CollectionsService::filter(
                &records,
                CollectionFilter {
                    status: status.map(Into::into),
                    collection_type: collection_type.map(Into::into),
                },
            );
            println!("{}", format_collection_list(&filtered));
        }
        CollectionsCommands::Stats {
            status,
            collection_type,
        } => {
            let records = service.derive(Some(&operator))?;
            let filtered = CollectionsService::filter(
                &records,
                CollectionFilter {
                    status: status.map(Into::into),
                    collection_type: collection_type.map(Into::into),
                },
            );
            let stats = CollectionsService::stats(&filtered);
            println!("{}", format_stats(&stats));
        }
        CollectionsCommands::Recognize { id, notes } => {
            handle_recognize(&service, &operator, &id, notes.as_deref())?;
        }
    }

    Ok(())
}

/// Resolve the acting user from `--as` or the configured operator
fn resolve_operator(
    storage: &Storage,
    settings: &Settings,
    acting_as: Option<String>,
) -> OpsResult<User> {
    let email = acting_as
        .or_else(|| settings.operator.clone())
        .ok_or_else(|| {
            OpsError::Config(
                "No operator configured. Set \"operator\" in config.json or pass --as <email>."
                    .into(),
            )
        })?;

    storage
        .users
        .get_by_email(&email)?
        .ok_or_else(|| OpsError::user_not_found(email))
}

fn handle_recognize(
    service: &CollectionsService,
    operator: &User,
    id: &str,
    notes: Option<&str>,
) -> OpsResult<()> {
    let collection_id = CollectionId::parse(id).map_err(OpsError::Validation)?;

    let records = service.derive(Some(operator))?;
    let record = records
        .iter()
        .find(|r| r.id == collection_id)
        .ok_or_else(|| OpsError::collection_not_found(id))?;

    match service.recognize(record, notes, operator) {
        Ok(result) => {
            println!(
                "Recognized {} collection of {} from {}.",
                result.record.collection_type, result.amount, result.record.customer_name
            );
            match result.new_outstanding {
                Some(balance) => {
                    println!("Customer outstanding balance is now {}.", balance)
                }
                None => println!("Customer record was not found; outstanding balance unchanged."),
            }
            Ok(())
        }
        Err(e) => {
            // Applied writes are not rolled back; the next derivation
            // reconciles against whatever landed
            error!("recognition of {} failed: {}", collection_id, e);
            Err(e)
        }
    }
}
