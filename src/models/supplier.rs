//! Supplier model

use serde::{Deserialize, Serialize};

use super::ids::SupplierId;

/// A supplier the business purchases stock from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique identifier
    pub id: SupplierId,

    /// Supplier company name
    pub name: String,

    /// Primary contact person
    pub contact_person: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,
}

impl Supplier {
    /// Create a new supplier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SupplierId::new(),
            name: name.into(),
            contact_person: None,
            phone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_supplier() {
        let supplier = Supplier::new("Valley Farms");
        assert_eq!(supplier.name, "Valley Farms");
        assert!(supplier.contact_person.is_none());
    }
}
