use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use expense_api::{Amount, ExpenseQuery, NewExpense, initialize_db, insert_expense};

/// A utility for creating a database of sample expenses for the expense_api server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'expenses.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let samples = [
        (4999, (2013, 2, 3), "Got my first bike!"),
        (1250, (2013, 2, 14), "Flowers"),
        (-2000, (2013, 3, 1), "Refund for broken lock"),
        (450, (2015, 4, 10), "Flat white coffee"),
        (89900, (2015, 4, 10), "Laptop"),
        (6575, (2016, 1, 1), "New Year's dinner"),
    ];

    for (cents, (year, month, day), description) in samples {
        let expense = NewExpense {
            amount: Amount::from_cents(cents),
            year,
            month,
            day,
            description: description.to_owned(),
        };

        insert_expense(&ExpenseQuery::insert(&expense), &conn)?;
    }

    println!("Success!");

    Ok(())
}
