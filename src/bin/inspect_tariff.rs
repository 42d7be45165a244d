use std::{env, process::exit};
use tarifador::ingest::{load_rate_table, BlockLayout};

fn main() {
    // Expect exactly one CLI argument: path to a tariff CSV export.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <TARIFF_CSV>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect_tariff(&args[1]) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

/// Ingest the export and print a per-destination summary of the rate table.
fn inspect_tariff(path: &str) -> anyhow::Result<()> {
    let table = load_rate_table(path, &BlockLayout::andreani())?;

    println!("=== Tariff File: {} ===", path);
    println!("Destinations: {}", table.len());
    println!();

    println!("=== Destinations ===");
    for (zip, entry) in &table.entries {
        let ceiling_kg = entry
            .last_range()
            .map(|r| r.max_grams / 1000.0)
            .unwrap_or(0.0);
        println!(
            "- {:<10} | bands: {:<2} | ceiling: {:>7.1} kg | excess: {:>10.2}/kg (base {:.2})",
            zip,
            entry.ranges.len(),
            ceiling_kg,
            entry.excess_price_per_kg,
            entry.base_excess_price,
        );
    }

    Ok(())
}
