//! Rate plans and the regional catalog they are loaded from

mod plan;
pub mod loader;

pub use plan::{
    DemandCharges, Period, RatePlan, RateStructure, Season, OFF_PEAK_PERIOD_IDS, PEAK_PERIOD_ID,
};
pub use loader::{RateCatalog, DEFAULT_CATALOG_PATH};
