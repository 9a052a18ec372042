use rust_decimal::Decimal;

use crate::error::StrInvestError;
use crate::types::{Money, Rate};
use crate::StrInvestResult;

/// Growth factor (1 + rate)^periods by square-and-multiply.
///
/// Returns `None` when the factor leaves the Decimal range.
pub fn compound_factor(rate: Rate, periods: u32) -> Option<Decimal> {
    let mut base = Decimal::ONE.checked_add(rate)?;
    let mut result = Decimal::ONE;
    let mut e = periods;
    while e > 0 {
        if e & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        e >>= 1;
        if e > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(result)
}

/// Payment (PMT)
///
/// Spreadsheet sign convention: a positive `present_value` (cash received)
/// yields a negative payment, so loan payments are usually computed as
/// `pmt(r, n, -principal, 0)`.
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> StrInvestResult<Money> {
    if nper == 0 {
        return Err(StrInvestError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        let total = present_value
            .checked_add(future_value)
            .ok_or_else(|| StrInvestError::out_of_range("present_value"))?;
        return Ok(-total / Decimal::from(nper));
    }

    // Once (1+r)^n leaves the Decimal range, (1+r)^n / ((1+r)^n - 1) is 1
    // to 28 digits: the payment is interest-only and the future value vanishes.
    let annuity = compound_factor(rate, nper)
        .and_then(|factor| Some((factor, (factor - Decimal::ONE).checked_div(rate)?)));
    let Some((factor, annuity_factor)) = annuity else {
        return present_value
            .checked_mul(rate)
            .map(|interest| -interest)
            .ok_or_else(|| StrInvestError::out_of_range("present_value"));
    };

    if annuity_factor.is_zero() {
        return Err(StrInvestError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let principal_part = (factor / annuity_factor)
        .checked_mul(present_value)
        .ok_or_else(|| StrInvestError::out_of_range("present_value"))?;
    let future_part = future_value
        .checked_div(annuity_factor)
        .ok_or_else(|| StrInvestError::out_of_range("future_value"))?;

    principal_part
        .checked_add(future_part)
        .map(|total| -total)
        .ok_or_else(|| StrInvestError::out_of_range("future_value"))
}
