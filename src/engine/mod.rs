//! Rate engine for monthly bill, savings, and ROI calculations

mod state;
mod calculator;
mod results;
pub mod hourly;

pub use state::{MonthlyUsage, TouSplit, SEASONAL_MULTIPLIERS, TOU_OFF_PEAK_SHARE, TOU_PEAK_SHARE};
pub use calculator::{RateEngine, PEAK_DEMAND_FACTOR};
pub use results::{
    round_currency, round_tenth, BillComponents, FinancialResult, HourRecord, LoadPeriod,
    MonthRecord, PaybackRating, ResultSummary, RoiRating,
};
pub use hourly::{hourly_profile, LoadShape, PEAK_HOURS};
