//! JSON-based rate catalog loader
//!
//! Loads rate plans from a regional catalog such as data/rates_ca.json

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::RatePlan;
use crate::customer::CustomerType;
use crate::error::{Result, RoiError};

/// Catalog file read at startup when present; the compiled-in copy is used otherwise
pub const DEFAULT_CATALOG_PATH: &str = "data/rates_ca.json";

const BUNDLED_CALIFORNIA: &str = include_str!("../../data/rates_ca.json");

/// Static collection of rate plans for one region
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateCatalog {
    #[serde(default)]
    pub region: Option<String>,

    pub plans: Vec<RatePlan>,
}

impl RateCatalog {
    /// Catalog compiled into the binary
    pub fn default_california() -> Result<Self> {
        Ok(serde_json::from_str(BUNDLED_CALIFORNIA)?)
    }

    /// Load a catalog from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} rate plans from {}",
            catalog.plans.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Load `DEFAULT_CATALOG_PATH`, falling back to the bundled catalog
    pub fn load_default() -> Result<Self> {
        Self::from_path_or_bundled(DEFAULT_CATALOG_PATH)
    }

    /// Load a catalog file if it exists, otherwise the bundled catalog
    pub fn from_path_or_bundled<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            Self::from_path(path)
        } else {
            debug!("{} not found, using bundled catalog", path.as_ref().display());
            Self::default_california()
        }
    }

    /// Load a catalog from any reader (e.g., request body)
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Plans offered to a customer type, in catalog order
    pub fn plans_for(&self, customer_type: CustomerType) -> Vec<&RatePlan> {
        self.plans
            .iter()
            .filter(|plan| customer_type.accepts(&plan.customer_type))
            .collect()
    }

    /// Look up a plan by id
    pub fn find(&self, id: &str) -> Option<&RatePlan> {
        self.plans.iter().find(|plan| plan.id == id)
    }

    /// Look up a plan by id, failing when it is not in the catalog
    pub fn get(&self, id: &str) -> Result<&RatePlan> {
        self.find(id).ok_or_else(|| RoiError::PlanNotFound(id.to_string()))
    }

    /// First plan offered to the customer type, used when none is selected
    pub fn default_plan_for(&self, customer_type: CustomerType) -> Option<&RatePlan> {
        self.plans
            .iter()
            .find(|plan| customer_type.accepts(&plan.customer_type))
    }
}
