//! User model
//!
//! Users are the staff operating the console: admins and managers run the
//! collections workflow, drivers receive allocations and record sales.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Role assigned to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Driver,
    #[default]
    Staff,
}

impl Role {
    /// Whether this role may view and recognize collections
    pub fn can_manage_collections(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Manager => write!(f, "Manager"),
            Self::Driver => write!(f, "Driver"),
            Self::Staff => write!(f, "Staff"),
        }
    }
}

/// A staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Email address, used to select the operator on the command line
    pub email: String,

    /// Assigned role
    #[serde(default)]
    pub role: Role,

    /// Inactive users are kept for historical joins but cannot operate
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Create a new active user
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
            active: true,
        }
    }
}
