//! CSV export of the monthly savings table and hourly load curve

use std::io::Write;

use csv::Writer;

use crate::engine::{HourRecord, MonthRecord};
use crate::error::Result;

const MONTHLY_HEADER: [&str; 10] = [
    "Month",
    "BillBefore",
    "BillAfter",
    "Savings",
    "SavingsPercent",
    "EnergyBefore",
    "EnergyAfter",
    "DemandBefore",
    "DemandAfter",
    "Fixed",
];

const HOURLY_HEADER: [&str; 4] = ["Hour", "Before", "After", "Period"];

/// Write the monthly breakdown with a header row
pub fn write_monthly_csv<W: Write>(writer: W, months: &[MonthRecord]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(MONTHLY_HEADER)?;

    for m in months {
        csv_writer.write_record([
            m.month.clone(),
            format!("{:.0}", m.bill_before),
            format!("{:.0}", m.bill_after),
            format!("{:.0}", m.savings),
            format!("{:.1}", m.savings_percent),
            format!("{:.0}", m.energy_before),
            format!("{:.0}", m.energy_after),
            format!("{:.0}", m.demand_before),
            format!("{:.0}", m.demand_after),
            format!("{:.0}", m.fixed),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the hourly load curve with a header row
pub fn write_hourly_csv<W: Write>(writer: W, hours: &[HourRecord]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(HOURLY_HEADER)?;

    for h in hours {
        csv_writer.write_record([
            h.label(),
            format!("{:.1}", h.before),
            format!("{:.1}", h.after),
            h.period.as_str().to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
