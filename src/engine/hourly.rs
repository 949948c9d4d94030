//! Illustrative 24-hour load curve before and after the program

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use super::results::{round_tenth, HourRecord, LoadPeriod};
use crate::customer::CustomerProfile;
use crate::program::ProgramImpact;

/// Hours (inclusive) treated as the peak window
pub const PEAK_HOURS: RangeInclusive<u32> = 16..=20;

/// Floor applied to the synthetic load (kW)
pub const MIN_LOAD_KW: f64 = 0.5;

/// Sinusoidal daily load shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadShape {
    /// Average load (kW)
    pub mean: f64,
    /// Swing around the mean (kW)
    pub amplitude: f64,
    /// Hour at which the curve crosses the mean on its way up
    pub phase_hours: f64,
}

pub const RESIDENTIAL_SHAPE: LoadShape = LoadShape { mean: 2.5, amplitude: 1.5, phase_hours: 6.0 };

pub const COMMERCIAL_SHAPE: LoadShape = LoadShape { mean: 15.0, amplitude: 10.0, phase_hours: 8.0 };

impl LoadShape {
    pub fn for_profile(profile: &CustomerProfile) -> Self {
        if profile.is_residential {
            RESIDENTIAL_SHAPE
        } else {
            COMMERCIAL_SHAPE
        }
    }

    /// Unfloored load at an hour of day
    pub fn load_at(&self, hour: u32) -> f64 {
        self.mean + self.amplitude * ((hour as f64 - self.phase_hours) / 24.0 * 2.0 * PI).sin()
    }
}

pub fn is_peak_hour(hour: u32) -> bool {
    PEAK_HOURS.contains(&hour)
}

/// Build the before/after curve for hours 00:00 through 23:00
///
/// During peak hours the larger of the energy and peak reductions applies;
/// off-peak only the energy reduction does.
pub fn hourly_profile(profile: &CustomerProfile, program: &ProgramImpact) -> Vec<HourRecord> {
    let shape = LoadShape::for_profile(profile);
    let energy_reduction = program.energy_reduction();

    (0..24)
        .map(|hour| {
            let before = shape.load_at(hour).max(MIN_LOAD_KW);
            let peak = is_peak_hour(hour);
            let peak_reduction = if peak { program.peak_reduction() } else { 0.0 };
            let after = before * (1.0 - energy_reduction.max(peak_reduction));

            HourRecord {
                hour,
                before: round_tenth(before),
                after: round_tenth(after),
                period: if peak { LoadPeriod::Peak } else { LoadPeriod::OffPeak },
            }
        })
        .collect()
}
