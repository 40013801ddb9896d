//! Expense Settler CLI
//!
//! Reads a JSON settlement request and prints the computed balances and
//! transfers as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- request.json > settlement.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use expense_settler::{engine, EngineError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(EngineError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let request = engine::read_request(reader)?;
    let settlement = engine::settle_request(&request)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine::write_output(&settlement, handle)?;

    Ok(())
}
