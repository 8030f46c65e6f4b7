//! Collection obligation models
//!
//! A collection record is a pure projection: it exists only while its order
//! still carries a positive credit or cheque balance and no completion
//! signal has fired for it. Records are rebuilt from scratch on every
//! derivation pass and are never persisted themselves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::ids::{CustomerId, OrderId};
use super::money::Money;

/// The kind of balance an obligation settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    Credit,
    Cheque,
}

impl CollectionType {
    /// Suffix used in composite collection ids
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Cheque => "cheque",
        }
    }

    /// Marker token written into order notes on recognition
    ///
    /// Its presence in an order's notes is one of the two completion
    /// signals the derivation pass honors.
    pub fn completion_marker(&self) -> &'static str {
        match self {
            Self::Credit => "[credit collected]",
            Self::Cheque => "[cheque collected]",
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Status of a collection obligation: one-way Pending -> Complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    #[default]
    Pending,
    Complete,
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// Composite, deterministic id of a collection obligation:
/// `{order uuid}-{credit|cheque}`
///
/// The same order yields at most one id per type, which is what makes
/// deduplication against the completion-signal set possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionId {
    order_id: OrderId,
    collection_type: CollectionType,
}

impl CollectionId {
    pub fn new(order_id: OrderId, collection_type: CollectionType) -> Self {
        Self {
            order_id,
            collection_type,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn collection_type(&self) -> CollectionType {
        self.collection_type
    }

    /// Parse a composite id of the form `{uuid}-credit` / `{uuid}-cheque`
    pub fn parse(s: &str) -> Result<Self, String> {
        let (uuid_part, collection_type) = if let Some(stripped) = s.strip_suffix("-credit") {
            (stripped, CollectionType::Credit)
        } else if let Some(stripped) = s.strip_suffix("-cheque") {
            (stripped, CollectionType::Cheque)
        } else {
            return Err(format!("Invalid collection id (missing type suffix): {}", s));
        };

        let order_id = OrderId::parse(uuid_part)
            .map_err(|e| format!("Invalid collection id '{}': {}", s, e))?;

        Ok(Self {
            order_id,
            collection_type,
        })
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.order_id.as_uuid(),
            self.collection_type.suffix()
        )
    }
}

impl Ord for CollectionId {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lexicographic on the composite string form; the documented
        // deterministic tiebreak for equal-date records
        self.to_string().cmp(&other.to_string())
    }
}

impl PartialOrd for CollectionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for CollectionId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CollectionId> for String {
    fn from(id: CollectionId) -> Self {
        id.to_string()
    }
}

/// An outstanding (or just-completed) collection obligation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// Deterministic composite id
    pub id: CollectionId,

    pub order_id: OrderId,

    pub customer_id: CustomerId,

    /// Customer display name resolved at derivation time
    pub customer_name: String,

    /// Display name of the user responsible for collecting
    pub collected_by: String,

    /// Business date the obligation is dated to (the order date)
    pub collected_at: NaiveDate,

    /// Amount to collect; always positive while the record exists
    pub amount: Money,

    pub collection_type: CollectionType,

    #[serde(default)]
    pub status: CollectionStatus,

    /// Verification notes attached at recognition time
    pub notes: Option<String>,
}

impl CollectionRecord {
    /// Whether this obligation is still awaiting collection
    pub fn is_pending(&self) -> bool {
        self.status == CollectionStatus::Pending
    }

    /// One-way transition to Complete
    pub fn mark_complete(&mut self) {
        self.status = CollectionStatus::Complete;
    }
}
