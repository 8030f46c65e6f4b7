//! opsdesk - Terminal-based operations console for small distribution businesses
//!
//! This library provides the core functionality for the opsdesk console:
//! order, customer, user, product, and supplier records backed by JSON
//! storage, a collections worklist derived from order balances, and
//! spreadsheet export in CSV and XLSX formats.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (orders, customers, users, collections, etc.)
//! - `storage`: JSON file storage layer and the completion ledger
//! - `services`: Business logic layer (collections derivation/recognition)
//! - `export`: Generic tabular exporter and per-entity adapters
//! - `audit`: Audit logging system
//! - `display`: Terminal table rendering
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use opsdesk::config::{paths::OpsPaths, settings::Settings};
//!
//! let paths = OpsPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::OpsError;
