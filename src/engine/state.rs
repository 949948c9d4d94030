//! Per-month usage quantities fed into the bill calculation

use crate::customer::CustomerProfile;
use crate::program::ProgramImpact;
use crate::rates::Season;

/// Seasonal shaping applied to the baseline usage and demand, January first
pub const SEASONAL_MULTIPLIERS: [f64; 12] = [1.1, 1.0, 0.9, 0.8, 0.7, 1.2, 1.6, 1.7, 1.4, 1.1, 1.2, 1.3];

/// Fixed share of monthly energy billed in the time-of-use peak window
pub const TOU_PEAK_SHARE: f64 = 0.4;

/// Fixed share of monthly energy billed off-peak
pub const TOU_OFF_PEAK_SHARE: f64 = 0.6;

/// Energy and demand for one billing month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyUsage {
    /// Calendar month index (0 = January)
    pub month_index: usize,

    pub season: Season,

    /// Monthly energy (kWh)
    pub kwh: f64,

    /// Monthly peak demand (kW)
    pub peak_kw: f64,
}

/// Time-of-use energy split between the peak and off-peak windows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouSplit {
    pub peak_kwh: f64,
    pub off_peak_kwh: f64,
}

impl MonthlyUsage {
    /// Baseline usage for a month, scaled by its seasonal multiplier
    pub fn baseline(profile: &CustomerProfile, month_index: usize) -> Self {
        let multiplier = SEASONAL_MULTIPLIERS[month_index];
        Self {
            month_index,
            season: Season::for_month_index(month_index),
            kwh: profile.base_monthly_usage_kwh * multiplier,
            peak_kw: profile.base_peak_demand_kw * multiplier,
        }
    }

    /// Usage after the program's energy and peak reductions
    pub fn after_program(&self, program: &ProgramImpact) -> Self {
        Self {
            kwh: self.kwh * (1.0 - program.energy_reduction()),
            peak_kw: self.peak_kw * (1.0 - program.peak_reduction()),
            ..*self
        }
    }

    /// Split energy 40/60 between peak and off-peak, then move `load_shift`
    /// (a fraction) of the peak share to off-peak
    pub fn tou_split(&self, load_shift: f64) -> TouSplit {
        let peak_kwh = self.kwh * TOU_PEAK_SHARE;
        let shift = peak_kwh * load_shift;
        TouSplit {
            peak_kwh: peak_kwh - shift,
            off_peak_kwh: self.kwh * TOU_OFF_PEAK_SHARE + shift,
        }
    }
}
