// Fleet Rental System - Core Library
// Exposes the domain model for use in the menu front end and tests

pub mod entities;
pub mod error;
pub mod history;
pub mod store;
pub mod system;

// Re-export commonly used types
pub use entities::{capitalize, Customer, Vehicle, VehicleKind, VehicleStatus};
pub use error::{DomainError, DomainResult};
pub use history::{RecordKind, RentalHistory, RentalRecord};
pub use store::RentalStore;
pub use system::RentalSystem;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
