//! Compare every eligible rate plan in the catalog for one customer
//!
//! Runs the calculations in parallel and prints plans ranked by annual savings

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use roi_calculator::{CustomerProfile, CustomerType, ProgramImpact, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "compare_plans", about = "Rank catalog rate plans by program savings")]
struct Args {
    /// Compare commercial plans instead of residential
    #[arg(long)]
    commercial: bool,

    /// Rate catalog JSON (defaults to data/rates_ca.json, else the bundled copy)
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(long, default_value_t = 15.0)]
    energy_reduction: f64,

    #[arg(long, default_value_t = 25.0)]
    peak_reduction: f64,

    #[arg(long, default_value_t = 10.0)]
    load_shift: f64,

    #[arg(long, default_value_t = 5000.0)]
    capex: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.catalog {
        Some(path) => ScenarioRunner::from_path(path)
            .with_context(|| format!("loading rate catalog {}", path.display()))?,
        None => ScenarioRunner::new().context("loading default rate catalog")?,
    };

    let customer_type = if args.commercial {
        CustomerType::Commercial
    } else {
        CustomerType::Residential
    };
    let profile = CustomerProfile::for_customer_type(customer_type);

    let program = ProgramImpact {
        energy_reduction_pct: args.energy_reduction,
        peak_reduction_pct: args.peak_reduction,
        load_shift_pct: args.load_shift,
        capex: args.capex,
    };
    program.validate()?;

    let start = Instant::now();
    let comparisons = runner.compare_plans(customer_type, &profile, &program);
    println!(
        "Compared {} {} plans in {:?}\n",
        comparisons.len(),
        customer_type.as_str(),
        start.elapsed()
    );

    println!(
        "{:<4} {:<20} {:>12} {:>12} {:>10} {:>9} {:>9}",
        "Rank", "Plan", "Before", "After", "Savings", "Payback", "ROI"
    );
    println!("{}", "-".repeat(82));

    for (rank, c) in comparisons.iter().enumerate() {
        let payback = c
            .result
            .payback_years()
            .map_or_else(|| "N/A".to_string(), |y| format!("{:.1}y", y));
        let roi = c
            .result
            .roi()
            .map_or_else(|| "N/A".to_string(), |r| format!("{:.1}%", r));

        println!(
            "{:<4} {:<20} {:>12.0} {:>12.0} {:>10.0} {:>9} {:>9}",
            rank + 1,
            c.plan_id,
            c.result.annual_bill_before,
            c.result.annual_bill_after,
            c.result.annual_savings,
            payback,
            roi,
        );
    }

    Ok(())
}
