use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::StrInvestError;
use crate::types::{Money, Rate};
use crate::StrInvestResult;

/// No calendar month holds more bookable nights than this.
pub const MAX_NIGHTS_PER_MONTH: Decimal = dec!(31);

/// Property, revenue, financing and operating-cost assumptions for a single
/// calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalAssumptions {
    /// Acquisition price of the property
    pub purchase_price: Money,
    /// Average nightly booking rate
    pub nightly_rate: Money,
    /// Average nights booked per month (occupancy)
    pub nights_booked_per_month: Decimal,
    /// Annual property appreciation (e.g. 0.03 = 3%)
    pub annual_appreciation_rate: Rate,
    /// Fixed annual mortgage interest rate
    pub interest_rate: Rate,
    /// Share of the purchase price paid in cash at closing
    pub down_payment_pct: Rate,
    /// Mortgage term in years
    pub loan_term_years: u32,
    /// Annual property taxes
    pub annual_taxes: Money,
    /// Annual insurance premium
    pub annual_insurance: Money,
    /// Annual maintenance and repair budget
    pub annual_maintenance: Money,
    /// Property manager's cut of gross rent
    pub management_fee_rate: Rate,
}

impl Default for RentalAssumptions {
    fn default() -> Self {
        Self {
            purchase_price: dec!(550000),
            nightly_rate: dec!(250),
            nights_booked_per_month: dec!(14.1),
            annual_appreciation_rate: dec!(0.03),
            interest_rate: dec!(0.065),
            down_payment_pct: dec!(0.10),
            loan_term_years: 30,
            annual_taxes: dec!(4000),
            annual_insurance: dec!(1800),
            annual_maintenance: dec!(2500),
            management_fee_rate: dec!(0.20),
        }
    }
}

impl RentalAssumptions {
    /// Amount financed: purchase price less the down payment.
    pub fn loan_amount(&self) -> Money {
        self.purchase_price - self.down_payment()
    }

    pub fn down_payment(&self) -> Money {
        self.purchase_price * self.down_payment_pct
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject assumptions outside their documented domain. Nothing is clamped.
pub fn validate_assumptions(a: &RentalAssumptions) -> StrInvestResult<()> {
    require_non_negative("purchase_price", a.purchase_price)?;
    require_non_negative("nightly_rate", a.nightly_rate)?;
    require_non_negative("nights_booked_per_month", a.nights_booked_per_month)?;

    if a.nights_booked_per_month > MAX_NIGHTS_PER_MONTH {
        return Err(StrInvestError::InvalidInput {
            field: "nights_booked_per_month".into(),
            reason: format!("Cannot book more than {MAX_NIGHTS_PER_MONTH} nights per month"),
        });
    }

    require_non_negative("annual_appreciation_rate", a.annual_appreciation_rate)?;
    require_non_negative("interest_rate", a.interest_rate)?;
    require_fraction("down_payment_pct", a.down_payment_pct)?;
    require_fraction("management_fee_rate", a.management_fee_rate)?;
    require_non_negative("annual_taxes", a.annual_taxes)?;
    require_non_negative("annual_insurance", a.annual_insurance)?;
    require_non_negative("annual_maintenance", a.annual_maintenance)?;

    if a.loan_term_years == 0 && a.loan_amount() > Decimal::ZERO {
        return Err(StrInvestError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least 1 year when part of the price is financed".into(),
        });
    }

    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> StrInvestResult<()> {
    if value < Decimal::ZERO {
        return Err(StrInvestError::InvalidInput {
            field: field.into(),
            reason: "Must be non-negative".into(),
        });
    }
    Ok(())
}

fn require_fraction(field: &str, value: Rate) -> StrInvestResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(StrInvestError::InvalidInput {
            field: field.into(),
            reason: "Must be between 0 and 1 (e.g. 0.10 = 10%)".into(),
        });
    }
    Ok(())
}
