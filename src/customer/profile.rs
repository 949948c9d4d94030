//! Baseline usage profiles for residential and commercial customers

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoiError};

/// Sample residential monthly usage (kWh)
pub const RESIDENTIAL_MONTHLY_KWH: f64 = 400.0;

/// Sample residential peak demand (kW)
pub const RESIDENTIAL_PEAK_KW: f64 = 5.5;

/// Sample non-residential monthly usage (kWh)
pub const COMMERCIAL_MONTHLY_KWH: f64 = 28_000.0;

/// Sample non-residential peak demand (kW)
pub const COMMERCIAL_PEAK_KW: f64 = 95.0;

/// Customer class selected by the analyst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Residential,
    Commercial,
    /// Catalog filter meaning "any plan"; profiles treat it as non-residential
    Both,
}

impl CustomerType {
    pub fn is_residential(&self) -> bool {
        matches!(self, CustomerType::Residential)
    }

    /// Whether a plan published for `plan_customer_type` is offered to this customer
    pub fn accepts(&self, plan_customer_type: &str) -> bool {
        match self {
            CustomerType::Both => true,
            CustomerType::Residential => plan_customer_type == "residential",
            CustomerType::Commercial => plan_customer_type == "commercial",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Residential => "residential",
            CustomerType::Commercial => "commercial",
            CustomerType::Both => "both",
        }
    }
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::Residential
    }
}

/// Where the baseline usage comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DataSource {
    /// Fixed sample profile for the customer type
    Sample,
    /// Analyst-entered average monthly usage, plus peak demand for commercial customers
    Manual {
        monthly_kwh: f64,
        #[serde(default)]
        peak_kw: Option<f64>,
    },
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Sample
    }
}

/// Baseline monthly usage and peak demand fed into the rate engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Average monthly energy use before seasonal shaping (kWh)
    pub base_monthly_usage_kwh: f64,

    /// Average monthly peak demand before seasonal shaping (kW)
    pub base_peak_demand_kw: f64,

    /// Selects the residential load-shape constants
    pub is_residential: bool,
}

impl CustomerProfile {
    /// Sample profile for a customer type
    pub fn for_customer_type(customer_type: CustomerType) -> Self {
        if customer_type.is_residential() {
            Self {
                base_monthly_usage_kwh: RESIDENTIAL_MONTHLY_KWH,
                base_peak_demand_kw: RESIDENTIAL_PEAK_KW,
                is_residential: true,
            }
        } else {
            Self {
                base_monthly_usage_kwh: COMMERCIAL_MONTHLY_KWH,
                base_peak_demand_kw: COMMERCIAL_PEAK_KW,
                is_residential: false,
            }
        }
    }

    /// Derive a profile from the customer type and the selected data source
    ///
    /// A manual peak demand is honoured for any non-residential customer;
    /// residential customers keep the sample peak.
    pub fn from_source(customer_type: CustomerType, source: &DataSource) -> Result<Self> {
        let mut profile = Self::for_customer_type(customer_type);

        if let DataSource::Manual { monthly_kwh, peak_kw } = *source {
            profile.base_monthly_usage_kwh = positive("monthly_kwh", monthly_kwh)?;

            if !customer_type.is_residential() {
                if let Some(kw) = peak_kw {
                    profile.base_peak_demand_kw = positive("peak_kw", kw)?;
                }
            }
        }

        Ok(profile)
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RoiError::InvalidUsage { field, value })
    }
}
