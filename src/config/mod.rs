//! Configuration and path management for opsdesk

pub mod paths;
pub mod settings;

pub use paths::OpsPaths;
pub use settings::{DefaultExportFormat, Settings};
