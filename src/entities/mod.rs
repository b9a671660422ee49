// Entity models: fleet vehicles and the customer roster

pub mod customer;
pub mod vehicle;

pub use customer::Customer;
pub use vehicle::{capitalize, Vehicle, VehicleKind, VehicleStatus};
