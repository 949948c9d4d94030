//! Rate plan structures matching the catalog format

use serde::{Deserialize, Serialize};

/// Period id for the on-peak window of a time-of-use plan
pub const PEAK_PERIOD_ID: &str = "peak";

/// Period ids accepted as the off-peak window, in lookup order
pub const OFF_PEAK_PERIOD_IDS: [&str; 2] = ["off_peak", "off_peak_evening"];

/// Rate season used for seasonal energy and demand charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    /// Season for a zero-based calendar month index (June through September is summer)
    pub fn for_month_index(index: usize) -> Self {
        if (5..=8).contains(&index) {
            Season::Summer
        } else {
            Season::Winter
        }
    }
}

/// One pricing window of a time-of-use plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: String,

    #[serde(default)]
    pub label: Option<String>,

    /// Window start as published, e.g. "16:00"
    #[serde(default)]
    pub start: Option<String>,

    #[serde(default)]
    pub end: Option<String>,

    /// Year-round rate ($/kWh), used when no seasonal rate is published
    #[serde(default)]
    pub rate: Option<f64>,

    #[serde(default)]
    pub rate_summer: Option<f64>,

    #[serde(default)]
    pub rate_winter: Option<f64>,
}

impl Period {
    /// Energy rate for the season, falling back to the year-round rate, then zero
    pub fn rate_for(&self, season: Season) -> f64 {
        let seasonal = match season {
            Season::Summer => self.rate_summer,
            Season::Winter => self.rate_winter,
        };
        seasonal.or(self.rate).unwrap_or(0.0)
    }
}

/// Demand charge schedule for commercial plans ($/kW)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandCharges {
    pub max_kw_summer: f64,
    pub max_kw_winter: f64,
    pub peak_kw_summer: f64,
    pub peak_kw_winter: f64,
}

impl DemandCharges {
    /// Rate applied to the monthly maximum demand
    pub fn max_demand_rate(&self, season: Season) -> f64 {
        match season {
            Season::Summer => self.max_kw_summer,
            Season::Winter => self.max_kw_winter,
        }
    }

    /// Rate applied to demand during the peak window
    pub fn peak_demand_rate(&self, season: Season) -> f64 {
        match season {
            Season::Summer => self.peak_kw_summer,
            Season::Winter => self.peak_kw_winter,
        }
    }
}

/// Rate structure shape, carrying only the fields its calculation needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RateStructure {
    /// Single energy rate ($/kWh) all year
    Flat {
        #[serde(default)]
        energy_rate: f64,
    },
    /// Peak / off-peak energy rates with summer and winter variants
    #[serde(rename = "tou")]
    TimeOfUse {
        #[serde(default)]
        periods: Vec<Period>,
    },
    /// Demand-charge tariff billed on monthly peak kW
    CommercialDemand {
        #[serde(default)]
        demand_charges: Option<DemandCharges>,
    },
}

impl RateStructure {
    pub fn label(&self) -> &'static str {
        match self {
            RateStructure::Flat { .. } => "Flat Rate",
            RateStructure::TimeOfUse { .. } => "Time-of-Use",
            RateStructure::CommercialDemand { .. } => "Demand Charge",
        }
    }

    /// Peak period of a time-of-use plan
    pub fn peak_period(&self) -> Option<&Period> {
        match self {
            RateStructure::TimeOfUse { periods } => {
                periods.iter().find(|p| p.id == PEAK_PERIOD_ID)
            }
            _ => None,
        }
    }

    /// First period matching one of the off-peak ids
    pub fn off_peak_period(&self) -> Option<&Period> {
        match self {
            RateStructure::TimeOfUse { periods } => periods
                .iter()
                .find(|p| OFF_PEAK_PERIOD_IDS.contains(&p.id.as_str())),
            _ => None,
        }
    }
}

/// A single tariff from the rate catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePlan {
    pub id: String,

    pub name: String,

    /// Customer class the plan is published for ("residential" or "commercial")
    #[serde(default)]
    pub customer_type: String,

    #[serde(default)]
    pub utility: Option<String>,

    /// Fixed customer charge per month
    #[serde(default)]
    pub fixed_monthly: f64,

    #[serde(flatten)]
    pub structure: RateStructure,
}

impl RatePlan {
    /// Flat plan with no fixed charge beyond `fixed_monthly`
    pub fn flat(id: &str, energy_rate: f64, fixed_monthly: f64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            customer_type: "residential".to_string(),
            utility: None,
            fixed_monthly,
            structure: RateStructure::Flat { energy_rate },
        }
    }

    /// Time-of-use plan from a list of periods
    pub fn time_of_use(id: &str, periods: Vec<Period>, fixed_monthly: f64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            customer_type: "residential".to_string(),
            utility: None,
            fixed_monthly,
            structure: RateStructure::TimeOfUse { periods },
        }
    }

    /// Commercial demand plan
    pub fn commercial_demand(id: &str, demand_charges: Option<DemandCharges>, fixed_monthly: f64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            customer_type: "commercial".to_string(),
            utility: None,
            fixed_monthly,
            structure: RateStructure::CommercialDemand { demand_charges },
        }
    }
}
