// 💾 Flat-File Store - three append-only line files
//
// Format (one record per line, comma-separated, no header, no quoting):
//   vehicles.txt:       Type,LicensePlate,Make,Model,Year,Status
//   customers.txt:      CustomerId,CustomerName
//   rental_records.txt: CustomerId,LicensePlate,RecordType,Date,Amount
//
// Known limitation: fields are written unescaped, so a make/model/name
// containing a comma corrupts that line on the next load.
//
// Loading is best effort: malformed lines are skipped with a warning, a
// record referencing an unknown customer or plate is dropped, a missing
// file means an empty collection. Every append opens, writes, flushes and
// closes within the call; no handle outlives it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::entities::{Customer, Vehicle, VehicleKind, VehicleStatus};
use crate::history::{RecordKind, RentalRecord};

/// Vehicles file name inside the data directory.
pub const VEHICLE_FILE: &str = "vehicles.txt";
/// Customers file name inside the data directory.
pub const CUSTOMER_FILE: &str = "customers.txt";
/// Rental records file name inside the data directory.
pub const RECORD_FILE: &str = "rental_records.txt";

// ============================================================================
// ROW TYPES (positional, headerless)
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct VehicleRow {
    type_tag: String,
    plate: String,
    make: String,
    model: String,
    year: i32,
    status: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CustomerRow {
    id: u32,
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RecordRow {
    customer_id: u32,
    plate: String,
    kind: String,
    date: String,
    amount: f64,
}

// ============================================================================
// STORE
// ============================================================================

/// Handle on the data directory holding the three flat files.
#[derive(Debug, Clone)]
pub struct RentalStore {
    dir: PathBuf,
}

impl RentalStore {
    /// Point the store at a data directory, creating it if needed. A
    /// directory that cannot be created is logged; subsequent appends will
    /// fail (and be logged) but nothing panics.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "failed to create data directory");
        }
        RentalStore { dir }
    }

    pub fn vehicles_path(&self) -> PathBuf {
        self.dir.join(VEHICLE_FILE)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.dir.join(CUSTOMER_FILE)
    }

    pub fn records_path(&self) -> PathBuf {
        self.dir.join(RECORD_FILE)
    }

    // ------------------------------------------------------------------------
    // LOAD (best effort, never fails the caller)
    // ------------------------------------------------------------------------

    /// Load the fleet. Each vehicle comes back as the concrete variant named
    /// by its type tag, with its persisted status restored (never reset to
    /// Available).
    pub fn load_vehicles(&self) -> Vec<Vehicle> {
        let mut vehicles = Vec::new();
        let Some(mut rdr) = self.open_reader(&self.vehicles_path()) else {
            return vehicles;
        };

        for (idx, result) in rdr.deserialize::<VehicleRow>().enumerate() {
            match result {
                Ok(row) => match vehicle_from_row(&row) {
                    Some(vehicle) => vehicles.push(vehicle),
                    None => warn!(line = idx + 1, "skipping malformed vehicle line"),
                },
                Err(e) => warn!(line = idx + 1, error = %e, "skipping unreadable vehicle line"),
            }
        }
        vehicles
    }

    /// Load the customer roster.
    pub fn load_customers(&self) -> Vec<Customer> {
        let mut customers = Vec::new();
        let Some(mut rdr) = self.open_reader(&self.customers_path()) else {
            return customers;
        };

        for (idx, result) in rdr.deserialize::<CustomerRow>().enumerate() {
            match result {
                Ok(row) => customers.push(Customer::new(row.id, row.name)),
                Err(e) => warn!(line = idx + 1, error = %e, "skipping unreadable customer line"),
            }
        }
        customers
    }

    /// Load the rental ledger. A record whose plate or customer id does not
    /// resolve against the already-loaded fleet/roster is dropped.
    pub fn load_records(
        &self,
        vehicles: &[Vehicle],
        customers: &[Customer],
    ) -> Vec<RentalRecord> {
        let mut records = Vec::new();
        let Some(mut rdr) = self.open_reader(&self.records_path()) else {
            return records;
        };

        for (idx, result) in rdr.deserialize::<RecordRow>().enumerate() {
            match result {
                Ok(row) => match record_from_row(&row, vehicles, customers) {
                    Some(record) => records.push(record),
                    None => debug!(line = idx + 1, "dropping orphaned or malformed record line"),
                },
                Err(e) => warn!(line = idx + 1, error = %e, "skipping unreadable record line"),
            }
        }
        records
    }

    fn open_reader(&self, path: &Path) -> Option<csv::Reader<std::fs::File>> {
        if !path.exists() {
            // absent file == empty collection
            return None;
        }
        match csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
        {
            Ok(rdr) => Some(rdr),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to open store file");
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // APPEND (one open-write-flush-close per mutation)
    // ------------------------------------------------------------------------

    pub fn append_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        let row = VehicleRow {
            type_tag: vehicle.kind().type_tag().to_string(),
            plate: vehicle.license_plate().unwrap_or("").to_string(),
            make: vehicle.make().to_string(),
            model: vehicle.model().to_string(),
            year: vehicle.year(),
            status: vehicle.status().as_str().to_string(),
        };
        self.append_row(&self.vehicles_path(), &row)
    }

    pub fn append_customer(&self, customer: &Customer) -> Result<()> {
        let row = CustomerRow {
            id: customer.id(),
            name: customer.name().to_string(),
        };
        self.append_row(&self.customers_path(), &row)
    }

    pub fn append_record(&self, record: &RentalRecord) -> Result<()> {
        let row = RecordRow {
            customer_id: record.customer_id(),
            plate: record.plate().to_string(),
            kind: record.kind().as_str().to_string(),
            date: record.date().to_string(),
            amount: record.amount(),
        };
        self.append_row(&self.records_path(), &row)
    }

    fn append_row<R: Serialize>(&self, path: &Path, row: &R) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open {} for append", path.display()))?;

        // QuoteStyle::Never keeps the format plain comma-separated text;
        // embedded commas are the documented corruption hazard.
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(file);

        wtr.serialize(row)
            .with_context(|| format!("failed to append to {}", path.display()))?;
        wtr.flush()
            .with_context(|| format!("failed to flush {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// ROW CONVERSIONS
// ============================================================================

fn vehicle_from_row(row: &VehicleRow) -> Option<Vehicle> {
    let kind = VehicleKind::from_type_tag(&row.type_tag)?;
    let status = VehicleStatus::parse(&row.status)?;
    let mut vehicle = Vehicle::new(kind, &row.plate, &row.make, &row.model, row.year).ok()?;
    vehicle.set_status(status);
    Some(vehicle)
}

fn record_from_row(
    row: &RecordRow,
    vehicles: &[Vehicle],
    customers: &[Customer],
) -> Option<RentalRecord> {
    let kind = RecordKind::parse(&row.kind)?;
    let date: chrono::NaiveDate = row.date.parse().ok()?;

    // resolve against loaded state; orphans are dropped
    let vehicle = vehicles.iter().find(|v| v.plate_matches(&row.plate))?;
    if !customers.iter().any(|c| c.id() == row.customer_id) {
        return None;
    }

    let plate = vehicle.license_plate()?;
    Some(RentalRecord::new(
        plate,
        row.customer_id,
        date,
        row.amount,
        kind,
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn test_store() -> (tempfile::TempDir, RentalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RentalStore::new(dir.path());
        (dir, store)
    }

    fn test_car(plate: &str) -> Vehicle {
        Vehicle::new(
            VehicleKind::Car { seats: 5 },
            plate,
            "Toyota",
            "Corolla",
            2019,
        )
        .unwrap()
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_missing_files_mean_empty_collections() {
        let (_dir, store) = test_store();
        assert!(store.load_vehicles().is_empty());
        assert!(store.load_customers().is_empty());
        assert!(store.load_records(&[], &[]).is_empty());
    }

    #[test]
    fn test_vehicle_round_trip_preserves_status() {
        let (_dir, store) = test_store();

        let mut rented = test_car("AAA111");
        rented.set_status(VehicleStatus::Rented);
        let mut shop = Vehicle::new(
            VehicleKind::PickupTruck {
                towing_capacity_tons: 1.0,
                four_wheel_drive: false,
            },
            "BBB222",
            "Ford",
            "Ranger",
            2021,
        )
        .unwrap();
        shop.set_status(VehicleStatus::UnderMaintenance);

        store.append_vehicle(&rented).unwrap();
        store.append_vehicle(&shop).unwrap();

        let loaded = store.load_vehicles();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].license_plate(), Some("AAA111"));
        assert_eq!(loaded[0].status(), VehicleStatus::Rented);
        assert_eq!(loaded[0].kind().type_tag(), "Car");
        assert_eq!(loaded[1].status(), VehicleStatus::UnderMaintenance);
        assert_eq!(loaded[1].kind().type_tag(), "PickupTruck");
    }

    #[test]
    fn test_vehicle_file_format() {
        let (_dir, store) = test_store();
        store.append_vehicle(&test_car("AAA111")).unwrap();

        let text = fs::read_to_string(store.vehicles_path()).unwrap();
        assert_eq!(text.trim_end(), "Car,AAA111,Toyota,Corolla,2019,Available");
    }

    #[test]
    fn test_malformed_vehicle_lines_skipped() {
        let (_dir, store) = test_store();
        store.append_vehicle(&test_car("AAA111")).unwrap();

        // wrong field count, bad year, unknown tag, unknown status, bad plate
        let mut text = fs::read_to_string(store.vehicles_path()).unwrap();
        text.push_str("Car,BBB222,Honda\n");
        text.push_str("Car,CCC333,Honda,Civic,twenty,Available\n");
        text.push_str("Hovercraft,DDD444,Honda,Civic,2020,Available\n");
        text.push_str("Car,EEE555,Honda,Civic,2020,Totaled\n");
        text.push_str("Car,F5,Honda,Civic,2020,Available\n");
        fs::write(store.vehicles_path(), text).unwrap();

        let loaded = store.load_vehicles();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].license_plate(), Some("AAA111"));
    }

    #[test]
    fn test_customer_round_trip() {
        let (_dir, store) = test_store();
        store.append_customer(&Customer::new(1, "Alice")).unwrap();
        store.append_customer(&Customer::new(2, "Bob")).unwrap();

        let loaded = store.load_customers();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], Customer::new(1, "Alice"));
        assert_eq!(loaded[1], Customer::new(2, "Bob"));
    }

    #[test]
    fn test_record_round_trip() {
        let (_dir, store) = test_store();
        let vehicles = vec![test_car("AAA111")];
        let customers = vec![Customer::new(7, "Alice")];

        let record = RentalRecord::new("AAA111", 7, test_date(), 100.0, RecordKind::Rent);
        store.append_record(&record).unwrap();

        let loaded = store.load_records(&vehicles, &customers);
        assert_eq!(loaded, vec![record]);
    }

    #[test]
    fn test_orphaned_records_dropped() {
        let (_dir, store) = test_store();
        let vehicles = vec![test_car("AAA111")];
        let customers = vec![Customer::new(7, "Alice")];

        // unknown customer, unknown plate, then a good one
        store
            .append_record(&RentalRecord::new(
                "AAA111",
                99,
                test_date(),
                10.0,
                RecordKind::Rent,
            ))
            .unwrap();
        store
            .append_record(&RentalRecord::new(
                "ZZZ999",
                7,
                test_date(),
                10.0,
                RecordKind::Rent,
            ))
            .unwrap();
        store
            .append_record(&RentalRecord::new(
                "AAA111",
                7,
                test_date(),
                10.0,
                RecordKind::Rent,
            ))
            .unwrap();

        let loaded = store.load_records(&vehicles, &customers);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].customer_id(), 7);
        assert_eq!(loaded[0].plate(), "AAA111");
    }

    #[test]
    fn test_malformed_record_lines_skipped() {
        let (_dir, store) = test_store();
        let vehicles = vec![test_car("AAA111")];
        let customers = vec![Customer::new(7, "Alice")];

        let mut text = String::new();
        text.push_str("7,AAA111,RENT,2024-06-15,100.0\n");
        text.push_str("7,AAA111,LEASE,2024-06-15,100.0\n"); // bad type
        text.push_str("7,AAA111,RENT,June 15,100.0\n"); // bad date
        text.push_str("7,AAA111,RENT,2024-06-15,lots\n"); // bad amount
        text.push_str("7,AAA111,RENT\n"); // short line
        fs::write(store.records_path(), text).unwrap();

        let loaded = store.load_records(&vehicles, &customers);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].amount(), 100.0);
    }

    #[test]
    fn test_embedded_comma_corrupts_line() {
        // documented limitation: no escaping on write
        let (_dir, store) = test_store();
        let vehicle = Vehicle::new(
            VehicleKind::Car { seats: 5 },
            "AAA111",
            "Rolls, royce",
            "Phantom",
            2022,
        )
        .unwrap();
        store.append_vehicle(&vehicle).unwrap();

        // the extra comma shifts every later field; the line no longer parses
        let loaded = store.load_vehicles();
        assert!(loaded.is_empty());
    }
}
