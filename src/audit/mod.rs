//! Audit logging system for opsdesk
//!
//! Records create, update, delete operations with before/after values
//! in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single audit log entry with timestamp, operation,
//!   entity information, and optional before/after values.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//! - `generate_diff`: creates human-readable diffs between entity states.

pub mod diff;
pub mod entry;
pub mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
