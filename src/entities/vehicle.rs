// 🚗 Vehicle Entity - plate identity + descriptive variants
//
// The license plate is the vehicle's natural key in the fleet. Variant
// extras (seats, towing capacity, ...) are descriptive only and never
// participate in rental eligibility.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

// ============================================================================
// VEHICLE STATUS
// ============================================================================

/// Lifecycle status of a fleet vehicle.
///
/// Only `Available -> Rented` (on rent) and `Rented -> Available` (on
/// return) are driven by the rental core; the remaining states are set by
/// fleet-management flows but still round-trip through persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Available,
    Held,
    Rented,
    UnderMaintenance,
    OutOfService,
}

impl VehicleStatus {
    /// All states, in display order.
    pub const ALL: [VehicleStatus; 5] = [
        VehicleStatus::Available,
        VehicleStatus::Held,
        VehicleStatus::Rented,
        VehicleStatus::UnderMaintenance,
        VehicleStatus::OutOfService,
    ];

    /// Textual name, as persisted in the vehicles file.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::Held => "Held",
            VehicleStatus::Rented => "Rented",
            VehicleStatus::UnderMaintenance => "UnderMaintenance",
            VehicleStatus::OutOfService => "OutOfService",
        }
    }

    /// Parse a persisted status name back into the enum.
    pub fn parse(name: &str) -> Option<VehicleStatus> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VEHICLE KIND
// ============================================================================

/// Closed set of vehicle variants.
///
/// Each variant carries its type-specific extras; the shared descriptor
/// (plate, make, model, year, status) lives on [`Vehicle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VehicleKind {
    Car { seats: u32 },
    Minibus { has_ac: bool },
    PickupTruck { towing_capacity_tons: f64, four_wheel_drive: bool },
    SportCar { seats: u32, top_speed_kmh: u32, convertible: bool },
}

impl VehicleKind {
    /// Canonical type tag, as persisted in the vehicles file.
    pub fn type_tag(&self) -> &'static str {
        match self {
            VehicleKind::Car { .. } => "Car",
            VehicleKind::Minibus { .. } => "Minibus",
            VehicleKind::PickupTruck { .. } => "PickupTruck",
            VehicleKind::SportCar { .. } => "SportCar",
        }
    }

    /// Rebuild a kind from its persisted type tag (case-insensitive).
    ///
    /// The flat file only carries the tag, so the type-specific extras come
    /// back with the stock values the fleet is seeded with.
    pub fn from_type_tag(tag: &str) -> Option<VehicleKind> {
        if tag.eq_ignore_ascii_case("Car") {
            Some(VehicleKind::Car { seats: 5 })
        } else if tag.eq_ignore_ascii_case("Minibus") {
            Some(VehicleKind::Minibus { has_ac: false })
        } else if tag.eq_ignore_ascii_case("PickupTruck") {
            Some(VehicleKind::PickupTruck {
                towing_capacity_tons: 1.0,
                four_wheel_drive: false,
            })
        } else if tag.eq_ignore_ascii_case("SportCar") {
            Some(VehicleKind::SportCar {
                seats: 2,
                top_speed_kmh: 300,
                convertible: false,
            })
        } else {
            None
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Capitalization normalizer for make/model: first char upper, rest lower.
/// Empty input passes through unchanged.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Validate and normalize a license plate: 3 ASCII letters + 3 digits,
/// any case in, uppercase out.
fn normalize_plate(plate: &str) -> DomainResult<String> {
    let chars: Vec<char> = plate.chars().collect();
    let valid = chars.len() == 6
        && chars[..3].iter().all(|c| c.is_ascii_alphabetic())
        && chars[3..].iter().all(|c| c.is_ascii_digit());

    if valid {
        Ok(plate.to_ascii_uppercase())
    } else {
        Err(DomainError::InvalidPlate(plate.to_string()))
    }
}

// ============================================================================
// VEHICLE
// ============================================================================

/// A fleet vehicle: shared descriptor + variant payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    plate: Option<String>,
    make: String,
    model: String,
    year: i32,
    status: VehicleStatus,
    kind: VehicleKind,
}

impl Vehicle {
    /// Create a vehicle with a plate. Fails if the plate is empty or does
    /// not match the AAA111 format; make/model are capitalization-normalized
    /// and status starts at `Available`.
    pub fn new(
        kind: VehicleKind,
        plate: &str,
        make: &str,
        model: &str,
        year: i32,
    ) -> DomainResult<Self> {
        let mut vehicle = Vehicle::unplated(kind, make, model, year);
        vehicle.set_license_plate(plate)?;
        Ok(vehicle)
    }

    /// Create a vehicle without a plate yet (it cannot join the fleet until
    /// one is assigned).
    pub fn unplated(kind: VehicleKind, make: &str, model: &str, year: i32) -> Self {
        Vehicle {
            plate: None,
            make: capitalize(make),
            model: capitalize(model),
            year,
            status: VehicleStatus::Available,
            kind,
        }
    }

    /// Assign a plate, validating the AAA111 format. The stored form is
    /// always uppercase.
    pub fn set_license_plate(&mut self, plate: &str) -> DomainResult<()> {
        self.plate = Some(normalize_plate(plate)?);
        Ok(())
    }

    /// Remove the plate without validation ("no plate" is a legal state for
    /// a vehicle outside the fleet).
    pub fn clear_license_plate(&mut self) {
        self.plate = None;
    }

    pub fn license_plate(&self) -> Option<&str> {
        self.plate.as_deref()
    }

    /// Case-insensitive plate comparison; a plateless vehicle matches
    /// nothing.
    pub fn plate_matches(&self, plate: &str) -> bool {
        self.plate
            .as_deref()
            .map_or(false, |p| p.eq_ignore_ascii_case(plate))
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    /// Unconditional status mutation. Transition rules live in the
    /// RentalSystem facade, not here.
    pub fn set_status(&mut self, status: VehicleStatus) {
        self.status = status;
    }

    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    /// One-line display form for the report surface.
    pub fn info(&self) -> String {
        format!(
            "| {} | {} | {} | {} | {} |",
            self.plate.as_deref().unwrap_or("-"),
            self.make,
            self.model,
            self.year,
            self.status
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
