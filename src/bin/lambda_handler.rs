//! AWS Lambda handler for rate-plan ROI calculations
//!
//! Accepts the calculator inputs as JSON and returns the financial result,
//! or a null result when no plan is selected or the calculation is disabled.

use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::{Deserialize, Serialize};

use roi_calculator::engine::ResultSummary;
use roi_calculator::{
    calculate, CalculationInputs, CustomerProfile, CustomerType, DataSource, FinancialResult,
    ProgramImpact, RateCatalog, RatePlan,
};

/// Input configuration for the calculation
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub customer_type: CustomerType,

    /// Sample profile unless manual usage is supplied
    #[serde(default)]
    pub data_source: DataSource,

    /// Catalog plan to price against
    #[serde(default)]
    pub plan_id: Option<String>,

    /// Inline plan, takes precedence over `plan_id`
    #[serde(default)]
    pub plan: Option<RatePlan>,

    /// Energy reduction (%, default: 15)
    #[serde(default = "default_energy_reduction")]
    pub energy_reduction: f64,

    /// Peak demand reduction (%, default: 25)
    #[serde(default = "default_peak_reduction")]
    pub peak_reduction: f64,

    /// Load shift (%, default: 10)
    #[serde(default = "default_load_shift")]
    pub load_shift: f64,

    /// Program capital cost (default: 5000)
    #[serde(default = "default_capex")]
    pub capex: f64,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_energy_reduction() -> f64 { ProgramImpact::default().energy_reduction_pct }
fn default_peak_reduction() -> f64 { ProgramImpact::default().peak_reduction_pct }
fn default_load_shift() -> f64 { ProgramImpact::default().load_shift_pct }
fn default_capex() -> f64 { ProgramImpact::default().capex }
fn default_enabled() -> bool { true }

/// Output returned to the caller
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub plan_id: Option<String>,
    pub result: Option<FinancialResult>,
    pub summary: Option<ResultSummary>,
}

fn handle(catalog: &RateCatalog, request: CalculateRequest) -> Result<CalculateResponse, Error> {
    let rate_plan = match (request.plan, &request.plan_id) {
        (Some(plan), _) => Some(plan),
        (None, Some(id)) => Some(catalog.get(id)?.clone()),
        (None, None) => None,
    };

    let program = ProgramImpact {
        energy_reduction_pct: request.energy_reduction,
        peak_reduction_pct: request.peak_reduction,
        load_shift_pct: request.load_shift,
        capex: request.capex,
    };
    program.validate()?;

    let inputs = CalculationInputs {
        customer: CustomerProfile::from_source(request.customer_type, &request.data_source)?,
        rate_plan,
        program,
        enabled: request.enabled,
    };

    let plan_id = inputs.rate_plan.as_ref().map(|p| p.id.clone());
    let result = calculate(&inputs);
    let summary = result.as_ref().map(FinancialResult::summary);

    info!(
        "Calculated plan {:?}: annual savings {:?}",
        plan_id,
        result.as_ref().map(|r| r.annual_savings)
    );

    Ok(CalculateResponse { plan_id, result, summary })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let catalog = Arc::new(RateCatalog::default_california()?);

    run(service_fn(move |event: LambdaEvent<CalculateRequest>| {
        let catalog = Arc::clone(&catalog);
        async move { handle(&catalog, event.payload) }
    }))
    .await
}
