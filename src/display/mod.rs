//! Display formatting for terminal output

pub mod collections;

pub use collections::{format_collection_list, format_stats};
