//! Calculation output structures

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Round a currency amount to whole units, halves rounding up
pub fn round_currency(value: f64) -> f64 {
    // f64::round takes halves away from zero
    if value < 0.0 && value.fract() == -0.5 {
        value.ceil()
    } else {
        value.round()
    }
}

/// Non-finite sentinels travel as JSON null
fn serialize_sentinel<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Some(*value).filter(|v| v.is_finite()).serialize(serializer)
}

fn deserialize_payback<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

fn deserialize_roi<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Round a load value to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Bill for one month split by charge type
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BillComponents {
    pub energy: f64,
    pub demand: f64,
    pub fixed: f64,
}

impl BillComponents {
    pub fn total(&self) -> f64 {
        self.energy + self.demand + self.fixed
    }
}

/// One month of the before/after comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Calendar month name
    pub month: String,

    pub bill_before: f64,
    pub bill_after: f64,
    pub savings: f64,

    /// Savings as a percent of the bill before (unrounded)
    pub savings_percent: f64,

    // Charge components
    pub energy_before: f64,
    pub energy_after: f64,
    pub demand_before: f64,
    pub demand_after: f64,
    pub fixed: f64,
}

impl MonthRecord {
    /// Build a rounded record from unrounded before/after bills
    pub fn from_bills(month: &str, before: &BillComponents, after: &BillComponents) -> Self {
        let bill_before = before.total();
        let bill_after = after.total();
        let savings = bill_before - bill_after;
        let savings_percent = if bill_before == 0.0 {
            0.0
        } else {
            savings / bill_before * 100.0
        };

        Self {
            month: month.to_string(),
            bill_before: round_currency(bill_before),
            bill_after: round_currency(bill_after),
            savings: round_currency(savings),
            savings_percent,
            energy_before: round_currency(before.energy),
            energy_after: round_currency(after.energy),
            demand_before: round_currency(before.demand),
            demand_after: round_currency(after.demand),
            fixed: round_currency(before.fixed),
        }
    }
}

/// Time-of-day window of an hourly load point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPeriod {
    #[serde(rename = "Peak")]
    Peak,
    #[serde(rename = "Off-Peak")]
    OffPeak,
}

impl LoadPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPeriod::Peak => "Peak",
            LoadPeriod::OffPeak => "Off-Peak",
        }
    }
}

/// One hour of the illustrative load curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    /// Hour of day (0-23)
    pub hour: u32,

    /// Load before the program (kW, one decimal)
    pub before: f64,

    /// Load after the program (kW, one decimal)
    pub after: f64,

    pub period: LoadPeriod,
}

impl HourRecord {
    /// Display label, e.g. "07:00"
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Complete calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialResult {
    pub annual_bill_before: f64,
    pub annual_bill_after: f64,
    pub annual_savings: f64,

    /// Baseline peak demand times the peak reduction (kW, unrounded)
    pub peak_reduction_kw: f64,

    pub peak_reduction_percent: f64,

    /// Years to recover capex; +inf when there are no annual savings
    #[serde(serialize_with = "serialize_sentinel", deserialize_with = "deserialize_payback")]
    pub simple_payback: f64,

    /// Annual savings over capex (%); NaN when capex is zero
    #[serde(serialize_with = "serialize_sentinel", deserialize_with = "deserialize_roi")]
    pub roi_percent: f64,

    pub monthly_breakdown: Vec<MonthRecord>,

    pub hourly_data: Vec<HourRecord>,
}

impl FinancialResult {
    /// Payback in years, or None when the program never pays back
    pub fn payback_years(&self) -> Option<f64> {
        Some(self.simple_payback).filter(|&v| pays_back(v))
    }

    /// ROI percent, or None when undefined
    pub fn roi(&self) -> Option<f64> {
        Some(self.roi_percent).filter(|v| v.is_finite())
    }

    /// Totals and ratings for the summary cards and savings table
    pub fn summary(&self) -> ResultSummary {
        let total_before: f64 = self.monthly_breakdown.iter().map(|m| m.bill_before).sum();
        let total_after: f64 = self.monthly_breakdown.iter().map(|m| m.bill_after).sum();
        let total_savings = total_before - total_after;

        let average_savings_percent = if total_before == 0.0 {
            0.0
        } else {
            total_savings / total_before * 100.0
        };

        let bill_reduction_percent = if self.annual_bill_before == 0.0 {
            0.0
        } else {
            self.annual_savings / self.annual_bill_before * 100.0
        };

        ResultSummary {
            total_before,
            total_after,
            total_savings,
            average_savings_percent,
            bill_reduction_percent,
            payback_rating: PaybackRating::from_years(self.simple_payback),
            roi_rating: RoiRating::from_percent(self.roi_percent),
        }
    }
}

/// Negative payback means the program loses money; -0.0 is zero capex with losses
fn pays_back(years: f64) -> bool {
    years.is_finite() && !years.is_sign_negative()
}

/// How quickly the program pays for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaybackRating {
    Excellent,
    Good,
    LongTerm,
    NotApplicable,
}

impl PaybackRating {
    pub fn from_years(years: f64) -> Self {
        if !pays_back(years) {
            PaybackRating::NotApplicable
        } else if years < 5.0 {
            PaybackRating::Excellent
        } else if years < 10.0 {
            PaybackRating::Good
        } else {
            PaybackRating::LongTerm
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaybackRating::Excellent => "Excellent",
            PaybackRating::Good => "Good",
            PaybackRating::LongTerm => "Long-term",
            PaybackRating::NotApplicable => "N/A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoiRating {
    High,
    Good,
    Moderate,
    NotApplicable,
}

impl RoiRating {
    pub fn from_percent(percent: f64) -> Self {
        if !percent.is_finite() {
            RoiRating::NotApplicable
        } else if percent > 15.0 {
            RoiRating::High
        } else if percent > 8.0 {
            RoiRating::Good
        } else {
            RoiRating::Moderate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoiRating::High => "High ROI",
            RoiRating::Good => "Good ROI",
            RoiRating::Moderate => "Moderate ROI",
            RoiRating::NotApplicable => "N/A",
        }
    }
}

/// Summary statistics for a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Sum of the rounded monthly bills before
    pub total_before: f64,
    pub total_after: f64,
    pub total_savings: f64,
    pub average_savings_percent: f64,
    pub bill_reduction_percent: f64,
    pub payback_rating: PaybackRating,
    pub roi_rating: RoiRating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency_halves_up() {
        assert_eq!(round_currency(97.5), 98.0);
        assert_eq!(round_currency(97.49), 97.0);
        assert_eq!(round_currency(-2.5), -2.0);
        assert_eq!(round_currency(88.00000000000001), 88.0);
        assert_eq!(round_currency(0.49999999999999994), 0.0);
        assert_eq!(round_currency(-2.6), -3.0);
    }

    #[test]
    fn test_month_record_zero_bill() {
        let zero = BillComponents::default();
        let record = MonthRecord::from_bills("January", &zero, &zero);
        assert_eq!(record.savings_percent, 0.0);
        assert_eq!(record.bill_before, 0.0);
    }

    #[test]
    fn test_hour_label() {
        let record = HourRecord { hour: 7, before: 1.0, after: 1.0, period: LoadPeriod::OffPeak };
        assert_eq!(record.label(), "07:00");
    }

    #[test]
    fn test_ratings() {
        assert_eq!(PaybackRating::from_years(3.2), PaybackRating::Excellent);
        assert_eq!(PaybackRating::from_years(7.0), PaybackRating::Good);
        assert_eq!(PaybackRating::from_years(12.0), PaybackRating::LongTerm);
        assert_eq!(PaybackRating::from_years(f64::INFINITY), PaybackRating::NotApplicable);
        assert_eq!(PaybackRating::from_years(0.0), PaybackRating::Excellent);
        assert_eq!(PaybackRating::from_years(-22.3), PaybackRating::NotApplicable);
        assert_eq!(PaybackRating::from_years(-0.0), PaybackRating::NotApplicable);

        assert_eq!(RoiRating::from_percent(20.0), RoiRating::High);
        assert_eq!(RoiRating::from_percent(10.0), RoiRating::Good);
        assert_eq!(RoiRating::from_percent(8.0), RoiRating::Moderate);
        assert_eq!(RoiRating::from_percent(f64::NAN), RoiRating::NotApplicable);
    }
}
