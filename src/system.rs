// 🏢 Rental System - the facade and invariant enforcer
//
// Owns the fleet, the customer roster and the rental history. Constructed
// once by the entry point and passed where needed; load happens at open,
// every mutation appends to the matching flat file within the same call.
//
// A failed append is logged and swallowed: the in-memory mutation stands,
// so memory and disk can disagree until the next successful save. That
// window is inherited behavior, kept on purpose.

use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::entities::{Customer, Vehicle, VehicleStatus};
use crate::error::{DomainError, DomainResult};
use crate::history::{RecordKind, RentalHistory, RentalRecord};
use crate::store::RentalStore;

/// The application-state object: fleet + roster + ledger + store handle.
#[derive(Debug)]
pub struct RentalSystem {
    store: RentalStore,
    vehicles: Vec<Vehicle>,
    customers: Vec<Customer>,
    history: RentalHistory,
}

impl RentalSystem {
    /// Open the system over a data directory, loading whatever state the
    /// three flat files hold. Missing files mean empty collections; I/O and
    /// parse problems are logged by the store, never raised here.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let store = RentalStore::new(data_dir);
        let vehicles = store.load_vehicles();
        let customers = store.load_customers();

        let mut history = RentalHistory::new();
        for record in store.load_records(&vehicles, &customers) {
            history.add_record(record);
        }

        info!(
            vehicles = vehicles.len(),
            customers = customers.len(),
            records = history.len(),
            "rental system loaded"
        );

        RentalSystem {
            store,
            vehicles,
            customers,
            history,
        }
    }

    // ------------------------------------------------------------------------
    // MUTATIONS
    // ------------------------------------------------------------------------

    /// Add a vehicle to the fleet. Rejected if it has no plate or the plate
    /// is already taken (case-insensitive).
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> DomainResult<()> {
        let plate = match vehicle.license_plate() {
            Some(p) => p.to_string(),
            None => return Err(DomainError::MissingPlate),
        };
        if self.find_vehicle_by_plate(&plate).is_some() {
            return Err(DomainError::DuplicatePlate(plate));
        }

        if let Err(e) = self.store.append_vehicle(&vehicle) {
            warn!(plate = %plate, error = %e, "failed to persist vehicle");
        }
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Add a customer to the roster. Rejected on id collision.
    pub fn add_customer(&mut self, customer: Customer) -> DomainResult<()> {
        if self.find_customer_by_id(customer.id()).is_some() {
            return Err(DomainError::DuplicateCustomer(customer.id()));
        }

        if let Err(e) = self.store.append_customer(&customer) {
            warn!(customer = customer.id(), error = %e, "failed to persist customer");
        }
        self.customers.push(customer);
        Ok(())
    }

    /// Rent a vehicle out: Available -> Rented plus one RENT record.
    ///
    /// Anything other than Available leaves the vehicle untouched and
    /// appends nothing, so repeated rent attempts have no extra effect.
    pub fn rent_vehicle(
        &mut self,
        plate: &str,
        customer_id: u32,
        date: NaiveDate,
        amount: f64,
    ) -> DomainResult<()> {
        if self.find_customer_by_id(customer_id).is_none() {
            return Err(DomainError::UnknownCustomer(customer_id));
        }
        let pos = self
            .vehicle_position(plate)
            .ok_or_else(|| DomainError::UnknownVehicle(plate.to_ascii_uppercase()))?;
        let canonical = canonical_plate(&self.vehicles[pos], plate);

        if self.vehicles[pos].status() != VehicleStatus::Available {
            return Err(DomainError::VehicleNotAvailable(canonical));
        }

        self.vehicles[pos].set_status(VehicleStatus::Rented);
        self.log_record(RentalRecord::new(
            canonical,
            customer_id,
            date,
            amount,
            RecordKind::Rent,
        ));
        Ok(())
    }

    /// Return a rented vehicle: Rented -> Available plus one RETURN record
    /// carrying the extra fees (zero is fine).
    pub fn return_vehicle(
        &mut self,
        plate: &str,
        customer_id: u32,
        date: NaiveDate,
        extra_fees: f64,
    ) -> DomainResult<()> {
        if self.find_customer_by_id(customer_id).is_none() {
            return Err(DomainError::UnknownCustomer(customer_id));
        }
        let pos = self
            .vehicle_position(plate)
            .ok_or_else(|| DomainError::UnknownVehicle(plate.to_ascii_uppercase()))?;
        let canonical = canonical_plate(&self.vehicles[pos], plate);

        if self.vehicles[pos].status() != VehicleStatus::Rented {
            return Err(DomainError::VehicleNotRented(canonical));
        }

        self.vehicles[pos].set_status(VehicleStatus::Available);
        self.log_record(RentalRecord::new(
            canonical,
            customer_id,
            date,
            extra_fees,
            RecordKind::Return,
        ));
        Ok(())
    }

    fn log_record(&mut self, record: RentalRecord) {
        if let Err(e) = self.store.append_record(&record) {
            warn!(plate = record.plate(), error = %e, "failed to persist rental record");
        }
        self.history.add_record(record);
    }

    // ------------------------------------------------------------------------
    // LOOKUPS & PROJECTIONS
    // ------------------------------------------------------------------------

    /// Case-insensitive exact plate match.
    pub fn find_vehicle_by_plate(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.plate_matches(plate))
    }

    pub fn find_customer_by_id(&self, id: u32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id() == id)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicles_with_status(&self, status: VehicleStatus) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.status() == status)
            .collect()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn history(&self) -> &RentalHistory {
        &self.history
    }

    fn vehicle_position(&self, plate: &str) -> Option<usize> {
        self.vehicles.iter().position(|v| v.plate_matches(plate))
    }

    // ------------------------------------------------------------------------
    // REPORTS (read-only text projections)
    // ------------------------------------------------------------------------

    /// Vehicle table, optionally filtered by status. Empty fleets render a
    /// "none found" line instead of failing.
    pub fn vehicle_report(&self, filter: Option<VehicleStatus>) -> String {
        let mut out = String::new();
        match filter {
            None => out.push_str("=== All Vehicles ===\n"),
            Some(status) => {
                let _ = writeln!(out, "=== {} Vehicles ===", status);
            }
        }
        let _ = writeln!(
            out,
            "| {:<12} | {:<8} | {:<12} | {:<12} | {:<6} | {:<16} |",
            "Type", "Plate", "Make", "Model", "Year", "Status"
        );
        out.push_str(
            "|--------------------------------------------------------------------------------|\n",
        );

        let mut found = false;
        for vehicle in &self.vehicles {
            if filter.is_some() && filter != Some(vehicle.status()) {
                continue;
            }
            found = true;
            let _ = writeln!(
                out,
                "| {:<12} | {:<8} | {:<12} | {:<12} | {:<6} | {:<16} |",
                vehicle.kind().type_tag(),
                vehicle.license_plate().unwrap_or("-"),
                vehicle.make(),
                vehicle.model(),
                vehicle.year(),
                vehicle.status()
            );
        }
        if !found {
            match filter {
                None => out.push_str("  No vehicles found.\n"),
                Some(status) => {
                    let _ = writeln!(out, "  No vehicles with status: {}", status);
                }
            }
        }
        out
    }

    /// Customer roster listing.
    pub fn customer_report(&self) -> String {
        if self.customers.is_empty() {
            return "  No customers found.\n".to_string();
        }
        let mut out = String::new();
        for customer in &self.customers {
            let _ = writeln!(out, "  {}", customer);
        }
        out
    }

    /// Full rental ledger, oldest first. Customer names are resolved from
    /// the roster at render time.
    pub fn history_report(&self) -> String {
        if self.history.is_empty() {
            return "  No rental history found.\n".to_string();
        }
        let mut out = String::new();
        let _ = writeln!(
            out,
            "| {:<8} | {:<8} | {:<20} | {:<12} | {:<12} |",
            "Type", "Plate", "Customer", "Date", "Amount"
        );
        out.push_str(
            "|--------------------------------------------------------------------------|\n",
        );
        for record in self.history.records() {
            let customer = self
                .find_customer_by_id(record.customer_id())
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| format!("#{}", record.customer_id()));
            let _ = writeln!(
                out,
                "| {:<8} | {:<8} | {:<20} | {:<12} | ${:<11.2} |",
                record.kind(),
                record.plate(),
                customer,
                record.date(),
                record.amount()
            );
        }
        out
    }
}

// the lookup that produced `pos` guarantees a plate; the fallback is for
// completeness only
fn canonical_plate(vehicle: &Vehicle, requested: &str) -> String {
    vehicle
        .license_plate()
        .map(str::to_string)
        .unwrap_or_else(|| requested.to_ascii_uppercase())
}

// ============================================================================
// TESTS
// ============================================================================
