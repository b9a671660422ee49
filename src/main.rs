// Menu front end: input collection + printing only.
// All business rules live in the RentalSystem facade.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::env;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use fleet_rental::{Customer, RentalSystem, Vehicle, VehicleKind, VehicleStatus};

fn main() -> Result<()> {
    init_tracing();

    let data_dir = env::args().nth(1).unwrap_or_else(|| "data".to_string());
    let mut system = RentalSystem::open(&data_dir);

    println!("🚗 Fleet Rental System v{}", fleet_rental::VERSION);
    println!("   Data directory: {data_dir}\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        let Some(choice) = next_line(&mut lines)? else {
            break;
        };

        match choice.trim() {
            "1" => add_vehicle(&mut system, &mut lines)?,
            "2" => add_customer(&mut system, &mut lines)?,
            "3" => rent_vehicle(&mut system, &mut lines)?,
            "4" => return_vehicle(&mut system, &mut lines)?,
            "5" => list_vehicles(&system, &mut lines)?,
            "6" => print!("\n{}", system.customer_report()),
            "7" => print!("\n{}", system.history_report()),
            "8" => find_vehicle(&system, &mut lines)?,
            "9" | "q" | "quit" => break,
            "" => {}
            other => println!("❌ Unknown option: {other}"),
        }
        println!();
    }

    println!("👋 Goodbye");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn print_menu() {
    println!("=== Menu ===");
    println!("1) Add vehicle    2) Add customer   3) Rent vehicle");
    println!("4) Return vehicle 5) List vehicles  6) List customers");
    println!("7) Rental history 8) Find vehicle   9) Quit");
    print!("> ");
    let _ = io::stdout().flush();
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

fn next_line(lines: &mut Lines) -> Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn prompt(lines: &mut Lines, label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    let _ = io::stdout().flush();
    next_line(lines)
}

fn add_vehicle(system: &mut RentalSystem, lines: &mut Lines) -> Result<()> {
    let Some(tag) = prompt(lines, "Type (Car/Minibus/PickupTruck/SportCar)")? else {
        return Ok(());
    };
    let Some(kind) = VehicleKind::from_type_tag(tag.trim()) else {
        println!("❌ Unknown vehicle type: {}", tag.trim());
        return Ok(());
    };
    let Some(plate) = prompt(lines, "Plate (AAA111)")? else {
        return Ok(());
    };
    let Some(make) = prompt(lines, "Make")? else {
        return Ok(());
    };
    let Some(model) = prompt(lines, "Model")? else {
        return Ok(());
    };
    let Some(year) = prompt(lines, "Year")? else {
        return Ok(());
    };
    let Ok(year) = year.trim().parse::<i32>() else {
        println!("❌ Year must be a number");
        return Ok(());
    };

    match Vehicle::new(kind, plate.trim(), make.trim(), model.trim(), year) {
        Ok(vehicle) => match system.add_vehicle(vehicle) {
            Ok(()) => println!("✓ Vehicle added"),
            Err(e) => println!("❌ {e}"),
        },
        Err(e) => println!("❌ {e}"),
    }
    Ok(())
}

fn add_customer(system: &mut RentalSystem, lines: &mut Lines) -> Result<()> {
    let Some(id) = prompt(lines, "Customer id")? else {
        return Ok(());
    };
    let Ok(id) = id.trim().parse::<u32>() else {
        println!("❌ Customer id must be a number");
        return Ok(());
    };
    let Some(name) = prompt(lines, "Name")? else {
        return Ok(());
    };

    match system.add_customer(Customer::new(id, name.trim())) {
        Ok(()) => println!("✓ Customer added"),
        Err(e) => println!("❌ {e}"),
    }
    Ok(())
}

fn read_transaction_inputs(lines: &mut Lines) -> Result<Option<(String, u32, NaiveDate, f64)>> {
    let Some(plate) = prompt(lines, "Plate")? else {
        return Ok(None);
    };
    let Some(id) = prompt(lines, "Customer id")? else {
        return Ok(None);
    };
    let Ok(id) = id.trim().parse::<u32>() else {
        println!("❌ Customer id must be a number");
        return Ok(None);
    };
    let Some(date) = prompt(lines, "Date (YYYY-MM-DD, empty = today)")? else {
        return Ok(None);
    };
    let date = if date.trim().is_empty() {
        Local::now().date_naive()
    } else {
        match date.trim().parse::<NaiveDate>() {
            Ok(d) => d,
            Err(_) => {
                println!("❌ Date must be YYYY-MM-DD");
                return Ok(None);
            }
        }
    };
    let Some(amount) = prompt(lines, "Amount")? else {
        return Ok(None);
    };
    let Ok(amount) = amount.trim().parse::<f64>() else {
        println!("❌ Amount must be a number");
        return Ok(None);
    };
    Ok(Some((plate.trim().to_string(), id, date, amount)))
}

fn rent_vehicle(system: &mut RentalSystem, lines: &mut Lines) -> Result<()> {
    let Some((plate, id, date, amount)) = read_transaction_inputs(lines)? else {
        return Ok(());
    };
    match system.rent_vehicle(&plate, id, date, amount) {
        Ok(()) => println!("✓ Vehicle rented"),
        Err(e) => println!("❌ {e}"),
    }
    Ok(())
}

fn return_vehicle(system: &mut RentalSystem, lines: &mut Lines) -> Result<()> {
    let Some((plate, id, date, extra_fees)) = read_transaction_inputs(lines)? else {
        return Ok(());
    };
    match system.return_vehicle(&plate, id, date, extra_fees) {
        Ok(()) => println!("✓ Vehicle returned"),
        Err(e) => println!("❌ {e}"),
    }
    Ok(())
}

fn list_vehicles(system: &RentalSystem, lines: &mut Lines) -> Result<()> {
    let Some(filter) = prompt(lines, "Status filter (empty = all)")? else {
        return Ok(());
    };
    let filter = filter.trim();
    if filter.is_empty() {
        print!("\n{}", system.vehicle_report(None));
    } else {
        match VehicleStatus::parse(filter) {
            Some(status) => print!("\n{}", system.vehicle_report(Some(status))),
            None => println!("❌ Unknown status: {filter}"),
        }
    }
    Ok(())
}

fn find_vehicle(system: &RentalSystem, lines: &mut Lines) -> Result<()> {
    let Some(plate) = prompt(lines, "Plate")? else {
        return Ok(());
    };
    match system.find_vehicle_by_plate(plate.trim()) {
        Some(vehicle) => println!("{}", vehicle.info()),
        None => println!("  No vehicle with plate {}", plate.trim().to_uppercase()),
    }
    Ok(())
}
