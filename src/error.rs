// Domain error model - every recoverable condition is an explicit value
//
// The rule here: validation failures and business-rule rejections are typed
// errors the caller can branch on; infrastructure failures (file I/O) are
// handled where they occur and never cross the domain boundary.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// License plate does not match the required AAA111 format.
    #[error("invalid license plate format (must be AAA111): {0:?}")]
    InvalidPlate(String),

    /// The vehicle has no plate assigned, so it cannot join the fleet.
    #[error("vehicle has no license plate")]
    MissingPlate,

    /// A vehicle with this plate is already in the fleet.
    #[error("vehicle already exists: {0}")]
    DuplicatePlate(String),

    /// A customer with this id is already on the roster.
    #[error("customer already exists: {0}")]
    DuplicateCustomer(u32),

    /// No fleet vehicle carries this plate.
    #[error("no vehicle with plate {0}")]
    UnknownVehicle(String),

    /// No roster customer has this id.
    #[error("no customer with id {0}")]
    UnknownCustomer(u32),

    /// Rent attempted on a vehicle that is not Available.
    #[error("vehicle {0} is not available for renting")]
    VehicleNotAvailable(String),

    /// Return attempted on a vehicle that is not Rented.
    #[error("vehicle {0} is not rented")]
    VehicleNotRented(String),
}
