//! ROI Calculator - Rate-plan engine for utility efficiency and demand-response programs
//!
//! This library provides:
//! - Customer usage profiles (sample constants or manual entry)
//! - Rate plan catalog loading for flat, time-of-use, and commercial demand tariffs
//! - Monthly before/after bill calculation with seasonal rate selection and load shift
//! - Payback, ROI, and an illustrative hourly load shape
//! - Batch plan comparison and CSV export

pub mod error;
pub mod customer;
pub mod rates;
pub mod program;
pub mod engine;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{RoiError, Result};
pub use customer::{CustomerProfile, CustomerType, DataSource};
pub use rates::{RatePlan, RateStructure, RateCatalog, Season};
pub use program::ProgramImpact;
pub use engine::{RateEngine, FinancialResult, MonthRecord, HourRecord};
pub use scenario::{calculate, CalculationInputs, ScenarioRunner};
