//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod collections;
pub mod export;

pub use collections::{handle_collections_command, CollectionsCommands};
pub use export::{handle_export_command, ExportArgs};
