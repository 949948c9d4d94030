//! ROI Calculator CLI
//!
//! Command-line interface for running a single rate-plan ROI calculation

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use roi_calculator::{
    calculate, CalculationInputs, CustomerProfile, CustomerType, DataSource, ProgramImpact,
    RateCatalog,
};
use roi_calculator::export::{write_hourly_csv, write_monthly_csv};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CustomerArg {
    Residential,
    Commercial,
    Both,
}

impl From<CustomerArg> for CustomerType {
    fn from(arg: CustomerArg) -> Self {
        match arg {
            CustomerArg::Residential => CustomerType::Residential,
            CustomerArg::Commercial => CustomerType::Commercial,
            CustomerArg::Both => CustomerType::Both,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "roi_calculator", version, about = "Rate-plan ROI calculator for energy programs")]
struct Args {
    /// Customer class
    #[arg(long, value_enum, default_value_t = CustomerArg::Residential)]
    customer_type: CustomerArg,

    /// Rate plan id (defaults to the first plan offered to the customer type)
    #[arg(long)]
    plan: Option<String>,

    /// Rate catalog JSON (defaults to data/rates_ca.json, else the bundled copy)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Energy reduction (%)
    #[arg(long, default_value_t = 15.0)]
    energy_reduction: f64,

    /// Peak demand reduction (%)
    #[arg(long, default_value_t = 25.0)]
    peak_reduction: f64,

    /// Load shifted from peak to off-peak (%)
    #[arg(long, default_value_t = 10.0)]
    load_shift: f64,

    /// Program capital cost
    #[arg(long, default_value_t = 5000.0)]
    capex: f64,

    /// Manual average monthly usage (kWh) instead of the sample profile
    #[arg(long)]
    monthly_kwh: Option<f64>,

    /// Manual peak demand (kW), commercial customers only
    #[arg(long, requires = "monthly_kwh")]
    peak_kw: Option<f64>,

    /// Monthly breakdown CSV output
    #[arg(long, default_value = "roi_monthly.csv")]
    output: PathBuf,

    /// Hourly load curve CSV output
    #[arg(long)]
    hourly_output: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let customer_type = CustomerType::from(args.customer_type);

    let catalog = match &args.catalog {
        Some(path) => RateCatalog::from_path(path)
            .with_context(|| format!("loading rate catalog {}", path.display()))?,
        None => RateCatalog::load_default().context("loading default rate catalog")?,
    };

    let plan = match &args.plan {
        Some(id) => catalog.get(id)?.clone(),
        None => catalog
            .default_plan_for(customer_type)
            .cloned()
            .with_context(|| format!("no rate plans for {} customers", customer_type.as_str()))?,
    };

    let source = match args.monthly_kwh {
        Some(monthly_kwh) => DataSource::Manual { monthly_kwh, peak_kw: args.peak_kw },
        None => DataSource::Sample,
    };
    let customer = CustomerProfile::from_source(customer_type, &source)?;

    let program = ProgramImpact {
        energy_reduction_pct: args.energy_reduction,
        peak_reduction_pct: args.peak_reduction,
        load_shift_pct: args.load_shift,
        capex: args.capex,
    };
    program.validate()?;

    println!("ROI Calculator v{}", env!("CARGO_PKG_VERSION"));
    println!("=====================\n");
    println!("Plan: {} ({}, {})", plan.name, plan.id, plan.structure.label());
    println!("  Customer: {}", customer_type.as_str());
    println!("  Monthly usage: {:.0} kWh", customer.base_monthly_usage_kwh);
    println!("  Peak demand: {:.1} kW", customer.base_peak_demand_kw);
    println!(
        "  Program: energy -{}%, peak -{}%, shift {}%, capex ${:.0}",
        program.energy_reduction_pct, program.peak_reduction_pct, program.load_shift_pct, program.capex
    );
    println!();

    let inputs = CalculationInputs {
        customer,
        rate_plan: Some(plan),
        program,
        enabled: true,
    };
    let result = calculate(&inputs).context("calculation did not run")?;
    let summary = result.summary();

    let payback = result
        .payback_years()
        .map_or_else(|| "N/A".to_string(), |y| format!("{:.1} years", y));
    let roi = result
        .roi()
        .map_or_else(|| "N/A".to_string(), |r| format!("{:.1}%", r));

    println!("Summary:");
    println!("  Annual Bill Before: ${:.0}", result.annual_bill_before);
    println!("  Annual Bill After:  ${:.0}", result.annual_bill_after);
    println!(
        "  Annual Savings:     ${:.0} ({:.1}% reduction)",
        result.annual_savings, summary.bill_reduction_percent
    );
    println!(
        "  Peak Reduction:     {:.1} kW ({:.1}%)",
        result.peak_reduction_kw, result.peak_reduction_percent
    );
    println!("  Simple Payback:     {} ({})", payback, summary.payback_rating.as_str());
    println!("  ROI:                {} ({})", roi, summary.roi_rating.as_str());
    println!();

    println!("{:<10} {:>10} {:>10} {:>9} {:>8}", "Month", "Before", "After", "Savings", "Pct");
    println!("{}", "-".repeat(51));
    for m in &result.monthly_breakdown {
        println!(
            "{:<10} {:>10.0} {:>10.0} {:>9.0} {:>7.1}%",
            m.month, m.bill_before, m.bill_after, m.savings, m.savings_percent
        );
    }
    println!("{}", "-".repeat(51));
    println!(
        "{:<10} {:>10.0} {:>10.0} {:>9.0} {:>7.1}%",
        "Total", summary.total_before, summary.total_after, summary.total_savings, summary.average_savings_percent
    );

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_monthly_csv(file, &result.monthly_breakdown)?;
    info!("Monthly breakdown written to {}", args.output.display());
    println!("\nMonthly breakdown written to: {}", args.output.display());

    if let Some(path) = &args.hourly_output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_hourly_csv(file, &result.hourly_data)?;
        println!("Hourly load curve written to: {}", path.display());
    }

    if args.json {
        println!("\n{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
