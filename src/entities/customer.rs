// 👤 Customer Entity - plain identity holder
//
// No validation lives here; duplicate-id rejection is the RentalSystem's
// job.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A renter: unique id + display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: u32,
    name: String,
}

impl Customer {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Customer {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_accessors() {
        let c = Customer::new(9999, "Test User");
        assert_eq!(c.id(), 9999);
        assert_eq!(c.name(), "Test User");
    }

    #[test]
    fn test_customer_display() {
        let c = Customer::new(42, "Ada Lovelace");
        assert_eq!(c.to_string(), "42: Ada Lovelace");
    }
}
