//! Calculation entry point and scenario runner for batch comparisons
//!
//! Loads the rate catalog once, then runs many calculations against it with
//! different plans or program assumptions.

use std::path::Path;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::customer::{CustomerProfile, CustomerType};
use crate::engine::{FinancialResult, RateEngine};
use crate::error::Result;
use crate::program::ProgramImpact;
use crate::rates::{RateCatalog, RatePlan};

/// Everything a single calculation needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationInputs {
    pub customer: CustomerProfile,

    /// Selected plan; nothing is computed until one is chosen
    pub rate_plan: Option<RatePlan>,

    pub program: ProgramImpact,

    /// Set once the analyst has asked for a calculation
    pub enabled: bool,
}

/// Run the rate engine, or return None when no plan is selected or the
/// calculation is disabled
pub fn calculate(inputs: &CalculationInputs) -> Option<FinancialResult> {
    if !inputs.enabled {
        return None;
    }
    let plan = inputs.rate_plan.as_ref()?;
    Some(RateEngine::new(plan).calculate(&inputs.customer, &inputs.program))
}

/// Result for one plan in a plan comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanComparison {
    pub plan_id: String,
    pub plan_name: String,
    pub result: FinancialResult,
}

/// Pre-loaded runner for batch calculations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_path("data/rates_ca.json")?;
///
/// for capex in [2_500.0, 5_000.0, 10_000.0] {
///     let program = ProgramImpact { capex, ..Default::default() };
///     let result = runner.run("pge_e_tou_c", &profile, &program)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    catalog: RateCatalog,
}

impl ScenarioRunner {
    /// Create runner with the default catalog
    pub fn new() -> Result<Self> {
        Ok(Self {
            catalog: RateCatalog::load_default()?,
        })
    }

    /// Create runner by loading a catalog file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            catalog: RateCatalog::from_path(path)?,
        })
    }

    /// Create runner with a pre-built catalog
    pub fn with_catalog(catalog: RateCatalog) -> Self {
        Self { catalog }
    }

    /// Run a single calculation against a catalog plan
    pub fn run(
        &self,
        plan_id: &str,
        profile: &CustomerProfile,
        program: &ProgramImpact,
    ) -> Result<FinancialResult> {
        let plan = self.catalog.get(plan_id)?;
        Ok(RateEngine::new(plan).calculate(profile, program))
    }

    /// Run several program assumptions against one plan
    pub fn run_scenarios(
        &self,
        plan_id: &str,
        profile: &CustomerProfile,
        programs: &[ProgramImpact],
    ) -> Result<Vec<FinancialResult>> {
        let engine = RateEngine::new(self.catalog.get(plan_id)?);
        Ok(programs
            .iter()
            .map(|program| engine.calculate(profile, program))
            .collect())
    }

    /// Evaluate every plan offered to the customer type, best annual savings first
    pub fn compare_plans(
        &self,
        customer_type: CustomerType,
        profile: &CustomerProfile,
        program: &ProgramImpact,
    ) -> Vec<PlanComparison> {
        let plans = self.catalog.plans_for(customer_type);
        debug!("Comparing {} plans for {} customers", plans.len(), customer_type.as_str());

        let mut comparisons: Vec<PlanComparison> = plans
            .par_iter()
            .map(|plan| PlanComparison {
                plan_id: plan.id.clone(),
                plan_name: plan.name.clone(),
                result: RateEngine::new(plan).calculate(profile, program),
            })
            .collect();

        comparisons.sort_by(|a, b| b.result.annual_savings.total_cmp(&a.result.annual_savings));
        comparisons
    }

    /// Get reference to the catalog for inspection
    pub fn catalog(&self) -> &RateCatalog {
        &self.catalog
    }
}
