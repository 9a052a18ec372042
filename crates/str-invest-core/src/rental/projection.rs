use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StrInvestError;
use crate::rental::assumptions::{validate_assumptions, RentalAssumptions};
use crate::rental::summary::FinancialSummary;
use crate::types::Money;
use crate::StrInvestResult;

/// Projection length used when the caller does not choose one.
pub const DEFAULT_HORIZON_YEARS: u32 = 15;

/// Longest projection accepted; bounds the row buffer.
pub const MAX_HORIZON_YEARS: u32 = 1000;

/// One year of the appreciation + cash-flow return projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub year: u32,
    /// Compounded gain in property value since purchase
    pub cumulative_appreciation: Money,
    /// Year-one cash flow times the number of years held
    pub cumulative_cash_flow: Money,
    /// (appreciation + cash flow) / down payment; not annualised
    pub roi: Decimal,
}

/// Project cumulative appreciation, cash flow and ROI for years
/// `1..=horizon_years`.
///
/// Cash flow is held flat at the year-one figure: no rent growth, cost
/// inflation or reinvestment.
pub fn project_roi(
    assumptions: &RentalAssumptions,
    summary: &FinancialSummary,
    horizon_years: u32,
) -> StrInvestResult<Vec<ProjectionRow>> {
    validate_assumptions(assumptions)?;

    if horizon_years == 0 || horizon_years > MAX_HORIZON_YEARS {
        return Err(StrInvestError::InvalidInput {
            field: "horizon_years".into(),
            reason: format!("Projection horizon must be between 1 and {MAX_HORIZON_YEARS} years"),
        });
    }

    if summary.down_payment.is_zero() {
        return Err(StrInvestError::DivisionByZero {
            context: "ROI relative to down payment (down payment is zero)".into(),
        });
    }

    let price = assumptions.purchase_price;
    let growth = Decimal::ONE + assumptions.annual_appreciation_rate;

    let mut rows = Vec::with_capacity(horizon_years as usize);
    let mut value_factor = Decimal::ONE;

    for year in 1..=horizon_years {
        value_factor = value_factor
            .checked_mul(growth)
            .ok_or_else(|| StrInvestError::out_of_range("annual_appreciation_rate"))?;

        let cumulative_appreciation = price
            .checked_mul(value_factor)
            .map(|value| value - price)
            .ok_or_else(|| StrInvestError::out_of_range("annual_appreciation_rate"))?;
        let cumulative_cash_flow = summary
            .annual_cash_flow
            .checked_mul(Decimal::from(year))
            .ok_or_else(|| StrInvestError::out_of_range("annual_cash_flow"))?;
        let roi = cumulative_appreciation
            .checked_add(cumulative_cash_flow)
            .and_then(|gain| gain.checked_div(summary.down_payment))
            .ok_or_else(|| StrInvestError::out_of_range("roi"))?;

        rows.push(ProjectionRow {
            year,
            cumulative_appreciation,
            cumulative_cash_flow,
            roi,
        });
    }

    Ok(rows)
}
