//! Error type for the fallible edges around the pure rate engine

use thiserror::Error;

/// Errors raised while loading catalogs, validating inputs, or exporting results
///
/// The engine itself never fails; these cover everything a caller does
/// before and after invoking it.
#[derive(Debug, Error)]
pub enum RoiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid rate catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("rate plan not found: {0}")]
    PlanNotFound(String),

    #[error("invalid program setting {field}: {value}")]
    InvalidProgram { field: &'static str, value: f64 },

    #[error("invalid usage input {field}: {value}")]
    InvalidUsage { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, RoiError>;
