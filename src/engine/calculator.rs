//! Core rate engine for monthly before/after bill calculations

use chrono::Month;
use log::{debug, warn};

use super::hourly::hourly_profile;
use super::results::{round_currency, BillComponents, FinancialResult, MonthRecord};
use super::state::MonthlyUsage;
use crate::customer::CustomerProfile;
use crate::program::ProgramImpact;
use crate::rates::{RatePlan, RateStructure};

/// Share of the monthly peak demand billed at the peak-window demand rate
pub const PEAK_DEMAND_FACTOR: f64 = 0.8;

/// Main rate engine
///
/// Pure with respect to its inputs: the same plan, profile, and program always
/// produce the same result.
#[derive(Debug, Clone, Copy)]
pub struct RateEngine<'a> {
    plan: &'a RatePlan,
}

impl<'a> RateEngine<'a> {
    /// Create an engine pricing usage under the given plan
    pub fn new(plan: &'a RatePlan) -> Self {
        Self { plan }
    }

    /// Run the twelve-month calculation and derive annual metrics
    pub fn calculate(&self, profile: &CustomerProfile, program: &ProgramImpact) -> FinancialResult {
        self.report_missing_rates();

        let mut monthly_breakdown = Vec::with_capacity(12);
        let mut annual_before = 0.0;
        let mut annual_after = 0.0;
        let mut month = Month::January;

        for index in 0..12 {
            let usage = MonthlyUsage::baseline(profile, index);
            let reduced = usage.after_program(program);

            // Load shift only reshapes the post-program split
            let before = self.bill(&usage, 0.0);
            let after = self.bill(&reduced, program.load_shift());

            annual_before += before.total();
            annual_after += after.total();
            monthly_breakdown.push(MonthRecord::from_bills(month.name(), &before, &after));

            month = month.succ();
        }

        let annual_savings = annual_before - annual_after;

        let simple_payback = if annual_savings == 0.0 {
            f64::INFINITY
        } else {
            program.capex / annual_savings
        };

        let roi_percent = if program.capex == 0.0 {
            f64::NAN
        } else {
            annual_savings / program.capex * 100.0
        };

        debug!(
            "Plan {}: annual bill {:.2} -> {:.2}, savings {:.2}",
            self.plan.id, annual_before, annual_after, annual_savings
        );

        FinancialResult {
            annual_bill_before: round_currency(annual_before),
            annual_bill_after: round_currency(annual_after),
            annual_savings: round_currency(annual_savings),
            peak_reduction_kw: profile.base_peak_demand_kw * program.peak_reduction_pct / 100.0,
            peak_reduction_percent: program.peak_reduction_pct,
            simple_payback,
            roi_percent,
            monthly_breakdown,
            hourly_data: hourly_profile(profile, program),
        }
    }

    /// Price one month of usage; `load_shift` is the fraction of peak energy moved off-peak
    pub fn bill(&self, usage: &MonthlyUsage, load_shift: f64) -> BillComponents {
        let mut bill = BillComponents {
            fixed: self.plan.fixed_monthly,
            ..Default::default()
        };

        match &self.plan.structure {
            RateStructure::Flat { energy_rate } => {
                bill.energy = usage.kwh * energy_rate;
            }
            RateStructure::TimeOfUse { .. } => {
                let split = usage.tou_split(load_shift);
                let peak_cost = self
                    .plan
                    .structure
                    .peak_period()
                    .map_or(0.0, |p| split.peak_kwh * p.rate_for(usage.season));
                let off_peak_cost = self
                    .plan
                    .structure
                    .off_peak_period()
                    .map_or(0.0, |p| split.off_peak_kwh * p.rate_for(usage.season));
                bill.energy = peak_cost + off_peak_cost;
            }
            RateStructure::CommercialDemand { demand_charges } => {
                // Demand plans bill demand only; no energy charge is applied
                if let Some(charges) = demand_charges {
                    bill.demand = usage.peak_kw * charges.max_demand_rate(usage.season)
                        + usage.peak_kw * PEAK_DEMAND_FACTOR * charges.peak_demand_rate(usage.season);
                }
            }
        }

        bill
    }

    fn report_missing_rates(&self) {
        match &self.plan.structure {
            RateStructure::TimeOfUse { .. } => {
                if self.plan.structure.peak_period().is_none() {
                    warn!("Plan {} has no peak period; peak energy priced at zero", self.plan.id);
                }
                if self.plan.structure.off_peak_period().is_none() {
                    warn!("Plan {} has no off-peak period; off-peak energy priced at zero", self.plan.id);
                }
            }
            RateStructure::CommercialDemand { demand_charges: None } => {
                warn!("Plan {} has no demand charges; demand priced at zero", self.plan.id);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerType;
    use crate::engine::PaybackRating;
    use crate::rates::{DemandCharges, Period, Season};
    use approx::assert_relative_eq;

    fn residential() -> CustomerProfile {
        CustomerProfile::for_customer_type(CustomerType::Residential)
    }

    fn commercial() -> CustomerProfile {
        CustomerProfile::for_customer_type(CustomerType::Commercial)
    }

    fn period(id: &str, summer: f64, winter: f64) -> Period {
        Period {
            id: id.to_string(),
            label: None,
            start: None,
            end: None,
            rate: None,
            rate_summer: Some(summer),
            rate_winter: Some(winter),
        }
    }

    fn tou_plan() -> RatePlan {
        RatePlan::time_of_use(
            "tou",
            vec![period("peak", 0.50, 0.40), period("off_peak", 0.30, 0.25)],
            10.0,
        )
    }

    fn demand_plan() -> RatePlan {
        RatePlan::commercial_demand(
            "demand",
            Some(DemandCharges {
                max_kw_summer: 20.0,
                max_kw_winter: 15.0,
                peak_kw_summer: 10.0,
                peak_kw_winter: 5.0,
            }),
            200.0,
        )
    }

    #[test]
    fn test_flat_january_bill() {
        let plan = RatePlan::flat("flat", 0.20, 10.0);
        let result = RateEngine::new(&plan).calculate(&residential(), &ProgramImpact::none());

        let jan = &result.monthly_breakdown[0];
        assert_eq!(jan.month, "January");
        assert_eq!(jan.energy_before, 88.0);
        assert_eq!(jan.bill_before, 98.0);
        assert_eq!(jan.fixed, 10.0);
        assert_eq!(jan.demand_before, 0.0);
    }

    #[test]
    fn test_breakdown_in_calendar_order() {
        let plan = tou_plan();
        let result = RateEngine::new(&plan).calculate(&residential(), &ProgramImpact::default());

        let months: Vec<&str> = result.monthly_breakdown.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(
            months,
            vec![
                "January", "February", "March", "April", "May", "June",
                "July", "August", "September", "October", "November", "December",
            ]
        );
        assert_eq!(result.hourly_data.len(), 24);
    }

    #[test]
    fn test_no_op_program_changes_nothing() {
        let program = ProgramImpact { capex: 1000.0, ..ProgramImpact::none() };

        for plan in [RatePlan::flat("flat", 0.25, 5.0), tou_plan(), demand_plan()] {
            let result = RateEngine::new(&plan).calculate(&commercial(), &program);
            for m in &result.monthly_breakdown {
                assert_eq!(m.bill_after, m.bill_before, "plan {} month {}", plan.id, m.month);
                assert_eq!(m.savings, 0.0);
            }
            assert_eq!(result.annual_savings, 0.0);
            assert_eq!(result.simple_payback, f64::INFINITY);
            assert!(result.payback_years().is_none());
            assert_eq!(result.roi_percent, 0.0);
        }
    }

    #[test]
    fn test_tou_seasonal_rates() {
        let plan = tou_plan();
        let engine = RateEngine::new(&plan);

        let january = MonthlyUsage::baseline(&residential(), 0);
        let bill = engine.bill(&january, 0.0);
        // 440 kWh: 176 peak at 0.40, 264 off-peak at 0.25
        assert_relative_eq!(bill.energy, 176.0 * 0.40 + 264.0 * 0.25, epsilon = 1e-9);

        let july = MonthlyUsage::baseline(&residential(), 6);
        assert_eq!(july.season, Season::Summer);
        let bill = engine.bill(&july, 0.0);
        // 640 kWh: 256 peak at 0.50, 384 off-peak at 0.30
        assert_relative_eq!(bill.energy, 256.0 * 0.50 + 384.0 * 0.30, epsilon = 1e-9);
    }

    #[test]
    fn test_load_shift_lowers_tou_bill() {
        let plan = tou_plan();
        let shift_only = ProgramImpact { load_shift_pct: 30.0, capex: 500.0, ..ProgramImpact::none() };
        let result = RateEngine::new(&plan).calculate(&residential(), &shift_only);

        // Shifting 30% of the peak share saves (peak - off-peak) rate on 12% of usage
        let jan = MonthlyUsage::baseline(&residential(), 0);
        let expected_jan = jan.kwh * 0.4 * 0.3 * (0.40 - 0.25);
        assert_eq!(result.monthly_breakdown[0].savings, round_currency(expected_jan));
        assert!(result.annual_savings > 0.0);

        // Load shift has no effect on a flat plan
        let flat = RatePlan::flat("flat", 0.3, 0.0);
        let flat_result = RateEngine::new(&flat).calculate(&residential(), &shift_only);
        assert_eq!(flat_result.annual_savings, 0.0);
    }

    #[test]
    fn test_tou_missing_period_prices_component_at_zero() {
        let plan = RatePlan::time_of_use("peak_only", vec![period("peak", 0.50, 0.40)], 0.0);
        let january = MonthlyUsage::baseline(&residential(), 0);
        let bill = RateEngine::new(&plan).bill(&january, 0.0);
        assert_relative_eq!(bill.energy, 176.0 * 0.40, epsilon = 1e-9);

        let empty = RatePlan::time_of_use("empty", Vec::new(), 12.0);
        let result = RateEngine::new(&empty).calculate(&residential(), &ProgramImpact::default());
        assert!(result.monthly_breakdown.iter().all(|m| m.bill_before == 12.0));
    }

    #[test]
    fn test_demand_plan_bills_demand_only() {
        let plan = demand_plan();
        let engine = RateEngine::new(&plan);

        let august = MonthlyUsage::baseline(&commercial(), 7);
        let bill = engine.bill(&august, 0.0);
        let kw = 95.0 * 1.7;
        assert_eq!(bill.energy, 0.0);
        assert_relative_eq!(bill.demand, kw * 20.0 + kw * 0.8 * 10.0, epsilon = 1e-9);
        assert_eq!(bill.fixed, 200.0);

        let program = ProgramImpact { peak_reduction_pct: 20.0, ..ProgramImpact::default() };
        let result = engine.calculate(&commercial(), &program);
        let aug = &result.monthly_breakdown[7];
        assert_eq!(aug.demand_after, round_currency(kw * 0.8 * 20.0 + kw * 0.8 * 0.8 * 10.0));
        assert_eq!(aug.energy_after, 0.0);
    }

    #[test]
    fn test_demand_plan_without_charges() {
        let plan = RatePlan::commercial_demand("bare", None, 50.0);
        let result = RateEngine::new(&plan).calculate(&commercial(), &ProgramImpact::default());
        assert!(result.monthly_breakdown.iter().all(|m| m.bill_before == 50.0 && m.bill_after == 50.0));
    }

    #[test]
    fn test_full_energy_reduction_on_flat_plan() {
        let plan = RatePlan::flat("flat", 0.20, 10.0);
        let program = ProgramImpact { energy_reduction_pct: 100.0, ..ProgramImpact::default() };
        let result = RateEngine::new(&plan).calculate(&residential(), &program);

        for m in &result.monthly_breakdown {
            assert_eq!(m.energy_after, 0.0);
            assert_eq!(m.bill_after, 10.0);
        }

        let engine = RateEngine::new(&plan);
        let jan = MonthlyUsage::baseline(&residential(), 0);
        let before = engine.bill(&jan, 0.0).total();
        let expected = (before - 10.0) / before * 100.0;
        assert_relative_eq!(result.monthly_breakdown[0].savings_percent, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_monthly_savings_sum_to_annual() {
        let profiles = [residential(), commercial()];
        let plans = [RatePlan::flat("flat", 0.2345, 7.5), tou_plan(), demand_plan()];

        for profile in &profiles {
            for plan in &plans {
                let result = RateEngine::new(plan).calculate(profile, &ProgramImpact::default());
                let summed: f64 = result.monthly_breakdown.iter().map(|m| m.savings).sum();
                // Each month and the total round independently
                assert!(
                    (summed - result.annual_savings).abs() <= 6.5,
                    "plan {}: {} vs {}",
                    plan.id,
                    summed,
                    result.annual_savings
                );
            }
        }
    }

    #[test]
    fn test_peak_reduction_kw_exact() {
        let plan = tou_plan();
        let program = ProgramImpact { peak_reduction_pct: 33.0, ..ProgramImpact::default() };
        let result = RateEngine::new(&plan).calculate(&residential(), &program);

        assert_eq!(result.peak_reduction_kw, 5.5 * 33.0 / 100.0);
        assert_eq!(result.peak_reduction_percent, 33.0);
    }

    #[test]
    fn test_payback_and_roi() {
        let plan = RatePlan::flat("flat", 0.20, 10.0);
        let program = ProgramImpact {
            energy_reduction_pct: 50.0,
            peak_reduction_pct: 0.0,
            load_shift_pct: 0.0,
            capex: 1000.0,
        };
        let result = RateEngine::new(&plan).calculate(&residential(), &program);

        // Annual energy is 400 * 14.0 = 5600 kWh; half of it at 0.20
        assert_relative_eq!(result.simple_payback, 1000.0 / 560.0, epsilon = 1e-9);
        assert_relative_eq!(result.roi_percent, 56.0, epsilon = 1e-9);
        assert_eq!(result.annual_savings, 560.0);
    }

    #[test]
    fn test_zero_capex_roi_sentinel() {
        let plan = tou_plan();
        let program = ProgramImpact { capex: 0.0, ..ProgramImpact::default() };
        let result = RateEngine::new(&plan).calculate(&residential(), &program);

        assert!(result.roi_percent.is_nan());
        assert!(result.roi().is_none());
        assert_eq!(result.simple_payback, 0.0);
    }

    #[test]
    fn test_losing_program_has_no_payback() {
        // Off-peak dearer than peak, so shifting load raises the bill
        let plan = RatePlan::time_of_use(
            "inverted",
            vec![period("peak", 0.20, 0.20), period("off_peak", 0.40, 0.40)],
            10.0,
        );
        let program = ProgramImpact { load_shift_pct: 50.0, capex: 5000.0, ..ProgramImpact::none() };
        let result = RateEngine::new(&plan).calculate(&residential(), &program);

        assert!(result.annual_savings < 0.0);
        assert!(result.simple_payback < 0.0);
        assert!(result.payback_years().is_none());
        assert_eq!(result.summary().payback_rating, PaybackRating::NotApplicable);

        let free = ProgramImpact { capex: 0.0, ..program };
        let free_result = RateEngine::new(&plan).calculate(&residential(), &free);
        assert!(free_result.payback_years().is_none());
        assert_eq!(free_result.summary().payback_rating, PaybackRating::NotApplicable);
    }

    #[test]
    fn test_sentinels_survive_json() {
        let plan = tou_plan();
        let program = ProgramImpact { capex: 0.0, ..ProgramImpact::default() };
        let result = RateEngine::new(&plan).calculate(&residential(), &program);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"roi_percent\":null"));

        let parsed: FinancialResult = serde_json::from_str(&json).unwrap();
        assert!(parsed.roi_percent.is_nan());
        assert_eq!(parsed.simple_payback, result.simple_payback);
        assert_eq!(parsed.monthly_breakdown, result.monthly_breakdown);

        let idle = RateEngine::new(&plan).calculate(&residential(), &ProgramImpact::none());
        let json = serde_json::to_string(&idle).unwrap();
        assert!(json.contains("\"simple_payback\":null"));

        let parsed: FinancialResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.simple_payback, f64::INFINITY);
        assert!(parsed.roi_percent.is_nan());
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let plan = demand_plan();
        let program = ProgramImpact::default();
        let engine = RateEngine::new(&plan);

        let first = engine.calculate(&commercial(), &program);
        let second = engine.calculate(&commercial(), &program);

        assert_eq!(first.monthly_breakdown, second.monthly_breakdown);
        assert_eq!(first.hourly_data, second.hourly_data);
        assert_eq!(first.simple_payback.to_bits(), second.simple_payback.to_bits());
        assert_eq!(first.roi_percent.to_bits(), second.roi_percent.to_bits());
        assert_eq!(first.annual_savings, second.annual_savings);
    }
}
