pub mod assumptions;
pub mod projection;
pub mod summary;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput};
use crate::StrInvestResult;

pub use assumptions::RentalAssumptions;
pub use projection::{project_roi, ProjectionRow, DEFAULT_HORIZON_YEARS, MAX_HORIZON_YEARS};
pub use summary::{compute_summary, FinancialSummary};

const AVG_NIGHTS_PER_MONTH: Decimal = dec!(30.4);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Assumptions plus the projection horizon for a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalAnalysisInput {
    #[serde(flatten)]
    pub assumptions: RentalAssumptions,
    /// Years to project (defaults to 15)
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
}

impl Default for RentalAnalysisInput {
    fn default() -> Self {
        Self {
            assumptions: RentalAssumptions::default(),
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON_YEARS
}

/// Summary metrics and the year-by-year ROI projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalAnalysisOutput {
    pub summary: FinancialSummary,
    pub projection: Vec<ProjectionRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the summary and ROI projection for a short-term rental purchase.
///
/// Returns a `ComputationOutput<RentalAnalysisOutput>` carrying advisory
/// warnings for unusual assumptions alongside the figures.
pub fn analyze_rental(
    input: &RentalAnalysisInput,
) -> StrInvestResult<ComputationOutput<RentalAnalysisOutput>> {
    let start = Instant::now();

    let summary = compute_summary(&input.assumptions)?;
    let projection = project_roi(&input.assumptions, &summary, input.horizon_years)?;
    let warnings = collect_warnings(&input.assumptions, &summary);

    log::debug!(
        "analysed rental: annual cash flow {}, {} projection rows, {} warnings",
        summary.annual_cash_flow,
        projection.len(),
        warnings.len()
    );

    let output = RentalAnalysisOutput {
        summary,
        projection,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Short-Term Rental Cash Flow & ROI (Appreciation + Cumulative Cash Flow)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(a: &RentalAssumptions, summary: &FinancialSummary) -> Vec<String> {
    let mut warnings = Vec::new();

    if summary.annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative cash flow — owner covers {:.0} per month out of pocket",
            summary.monthly_out_of_pocket
        ));
    }

    let occupancy = a.nights_booked_per_month / AVG_NIGHTS_PER_MONTH;
    if occupancy > dec!(0.80) {
        warnings.push(format!(
            "Occupancy of {:.1}% exceeds 80% — optimistic for most STR markets",
            occupancy * dec!(100)
        ));
    }

    if a.management_fee_rate > dec!(0.35) {
        warnings.push(format!(
            "Management fee of {:.1}% exceeds 35% — above typical full-service rates",
            a.management_fee_rate * dec!(100)
        ));
    }

    if a.interest_rate > dec!(0.15) {
        warnings.push(format!(
            "Interest rate of {:.2}% exceeds 15% — verify loan terms",
            a.interest_rate.saturating_mul(dec!(100))
        ));
    }

    if summary.loan_amount > Decimal::ZERO && a.down_payment_pct < dec!(0.035) {
        warnings.push(format!(
            "Down payment of {:.1}% is below 3.5% — few lenders finance investment property this way",
            a.down_payment_pct * dec!(100)
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_defaults() {
        let result = analyze_rental(&RentalAnalysisInput::default()).unwrap();
        let out = &result.result;

        assert_eq!(out.summary.monthly_rent, dec!(3525));
        assert_eq!(out.projection.len(), 15);
        assert_eq!(
            result.methodology,
            "Short-Term Rental Cash Flow & ROI (Appreciation + Cumulative Cash Flow)"
        );
    }

    #[test]
    fn test_negative_cash_flow_warning() {
        let result = analyze_rental(&RentalAnalysisInput::default()).unwrap();
        let warned = result
            .warnings
            .iter()
            .any(|w| w.contains("Negative cash flow"));
        assert!(warned, "Expected negative cash flow warning");
    }

    #[test]
    fn test_high_occupancy_warning() {
        let mut input = RentalAnalysisInput::default();
        input.assumptions.nights_booked_per_month = dec!(28);

        let result = analyze_rental(&input).unwrap();
        let warned = result.warnings.iter().any(|w| w.contains("exceeds 80%"));
        assert!(warned, "Expected occupancy warning");
    }

    #[test]
    fn test_profitable_property_has_no_cash_flow_warning() {
        let mut input = RentalAnalysisInput::default();
        input.assumptions.nightly_rate = dec!(450);

        let result = analyze_rental(&input).unwrap();
        assert!(result.result.summary.annual_cash_flow > Decimal::ZERO);
        assert!(!result
            .warnings
            .iter()
            .any(|w| w.contains("Negative cash flow")));
    }

    #[test]
    fn test_zero_down_payment_propagates() {
        let mut input = RentalAnalysisInput::default();
        input.assumptions.down_payment_pct = Decimal::ZERO;
        assert!(analyze_rental(&input).is_err());
    }

    #[test]
    fn test_assumptions_echoed() {
        let result = analyze_rental(&RentalAnalysisInput::default()).unwrap();
        assert_eq!(result.assumptions["horizon_years"], 15);
        assert!(result.assumptions.get("purchase_price").is_some());
    }

    #[test]
    fn test_huge_rate_on_cash_purchase_still_warns() {
        let mut input = RentalAnalysisInput::default();
        input.assumptions.down_payment_pct = Decimal::ONE;
        input.assumptions.interest_rate = Decimal::MAX;

        let result = analyze_rental(&input).unwrap();
        assert_eq!(result.result.summary.monthly_mortgage_payment, Decimal::ZERO);
        assert!(result.warnings.iter().any(|w| w.contains("exceeds 15%")));
    }
}
