use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::StrInvestError;
use crate::rental::assumptions::{validate_assumptions, RentalAssumptions};
use crate::time_value;
use crate::types::{Money, Rate};
use crate::StrInvestResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Point-in-time revenue, financing and cash-flow figures for one set of
/// assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Nightly rate x nights booked per month
    pub monthly_rent: Money,
    pub annual_rent: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    /// Fixed amortising payment on the loan
    pub monthly_mortgage_payment: Money,
    pub annual_mortgage_payment: Money,
    /// Management fee on annual rent
    pub management_fees: Money,
    /// Debt service plus taxes, insurance, maintenance and management
    pub annual_expenses: Money,
    /// Annual rent less annual expenses (negative when the property loses money)
    pub annual_cash_flow: Money,
    /// Monthly shortfall the owner covers; zero when cash flow is non-negative
    pub monthly_out_of_pocket: Money,
}

/// Compute the first-year financial summary for a rental purchase.
pub fn compute_summary(assumptions: &RentalAssumptions) -> StrInvestResult<FinancialSummary> {
    validate_assumptions(assumptions)?;

    let monthly_rent = assumptions
        .nightly_rate
        .checked_mul(assumptions.nights_booked_per_month)
        .ok_or_else(|| StrInvestError::out_of_range("nightly_rate"))?;
    let annual_rent = monthly_rent
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| StrInvestError::out_of_range("nightly_rate"))?;

    let down_payment = assumptions.down_payment();
    let loan_amount = assumptions.loan_amount();

    let monthly_mortgage_payment = monthly_mortgage_payment(
        loan_amount,
        assumptions.interest_rate,
        assumptions.loan_term_years,
    )?;
    let annual_mortgage_payment = monthly_mortgage_payment
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| StrInvestError::out_of_range("interest_rate"))?;

    // Fee rate is capped at 1, so the fee never exceeds annual rent.
    let management_fees = annual_rent * assumptions.management_fee_rate;
    let annual_expenses = [
        assumptions.annual_taxes,
        assumptions.annual_insurance,
        assumptions.annual_maintenance,
        management_fees,
    ]
    .into_iter()
    .try_fold(annual_mortgage_payment, Decimal::checked_add)
    .ok_or_else(|| StrInvestError::out_of_range("annual_expenses"))?;

    let annual_cash_flow = annual_rent - annual_expenses;
    let monthly_out_of_pocket = if annual_cash_flow < Decimal::ZERO {
        -annual_cash_flow / MONTHS_PER_YEAR
    } else {
        Decimal::ZERO
    };

    Ok(FinancialSummary {
        monthly_rent,
        annual_rent,
        down_payment,
        loan_amount,
        monthly_mortgage_payment,
        annual_mortgage_payment,
        management_fees,
        annual_expenses,
        annual_cash_flow,
        monthly_out_of_pocket,
    })
}

// ---------------------------------------------------------------------------
// Mortgage helpers
// ---------------------------------------------------------------------------

/// Standard fixed-rate mortgage payment: P * r / (1 - (1+r)^-n), with
/// r = annual_rate / 12 and n = term_years * 12.
///
/// Nothing financed means nothing to pay, whatever the term.
pub fn monthly_mortgage_payment(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
) -> StrInvestResult<Money> {
    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    let total_months = term_years
        .checked_mul(12)
        .ok_or_else(|| StrInvestError::InvalidInput {
            field: "loan_term_years".into(),
            reason: format!("Loan term of {term_years} years is out of range"),
        })?;

    time_value::pmt(monthly_rate, total_months, -principal, Decimal::ZERO)
}
