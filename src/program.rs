//! Program impact assumptions applied to the baseline profile

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoiError};

/// Expected impact of the efficiency / demand-response program
///
/// Percentages are whole-number percents in `[0, 100]`. The engine does not
/// check ranges; callers run [`ProgramImpact::validate`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgramImpact {
    /// Overall kWh reduction (%)
    pub energy_reduction_pct: f64,

    /// Peak kW reduction during on-peak hours (%)
    pub peak_reduction_pct: f64,

    /// Share of on-peak energy moved to off-peak (%)
    pub load_shift_pct: f64,

    /// Upfront program investment
    pub capex: f64,
}

impl Default for ProgramImpact {
    fn default() -> Self {
        Self {
            energy_reduction_pct: 15.0,
            peak_reduction_pct: 25.0,
            load_shift_pct: 10.0,
            capex: 5000.0,
        }
    }
}

impl ProgramImpact {
    /// Program with no impact and no cost
    pub fn none() -> Self {
        Self {
            energy_reduction_pct: 0.0,
            peak_reduction_pct: 0.0,
            load_shift_pct: 0.0,
            capex: 0.0,
        }
    }

    pub fn energy_reduction(&self) -> f64 {
        self.energy_reduction_pct / 100.0
    }

    pub fn peak_reduction(&self) -> f64 {
        self.peak_reduction_pct / 100.0
    }

    pub fn load_shift(&self) -> f64 {
        self.load_shift_pct / 100.0
    }

    /// Check percentage ranges and a non-negative capex
    pub fn validate(&self) -> Result<()> {
        let percents = [
            ("energy_reduction_pct", self.energy_reduction_pct),
            ("peak_reduction_pct", self.peak_reduction_pct),
            ("load_shift_pct", self.load_shift_pct),
        ];

        for (field, value) in percents {
            if !(0.0..=100.0).contains(&value) {
                return Err(RoiError::InvalidProgram { field, value });
            }
        }

        if !self.capex.is_finite() || self.capex < 0.0 {
            return Err(RoiError::InvalidProgram { field: "capex", value: self.capex });
        }

        Ok(())
    }
}
