use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use str_invest_core::rental::{self, RentalAssumptions};
use str_invest_core::rental::summary::FinancialSummary;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Assumptions with the summary they produced, for `project_roi`.
#[derive(Deserialize)]
struct ProjectionRequest {
    assumptions: RentalAssumptions,
    summary: FinancialSummary,
    #[serde(default = "default_horizon")]
    horizon_years: u32,
}

fn default_horizon() -> u32 {
    rental::DEFAULT_HORIZON_YEARS
}

// ---------------------------------------------------------------------------
// Rental model
// ---------------------------------------------------------------------------

#[napi]
pub fn default_assumptions() -> NapiResult<String> {
    serde_json::to_string(&RentalAssumptions::default()).map_err(to_napi_error)
}

#[napi]
pub fn compute_summary(input_json: String) -> NapiResult<String> {
    let input: RentalAssumptions = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::compute_summary(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_roi(input_json: String) -> NapiResult<String> {
    let input: ProjectionRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::project_roi(&input.assumptions, &input.summary, input.horizon_years)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_rental(input_json: String) -> NapiResult<String> {
    let input: rental::RentalAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::analyze_rental(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn rental_sensitivity(input_json: String) -> NapiResult<String> {
    let input: rental::sensitivity::RentalSensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::sensitivity::rental_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
