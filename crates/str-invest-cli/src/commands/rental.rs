use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use str_invest_core::rental::{self, RentalAnalysisInput, RentalAssumptions};

use crate::input;

/// Arguments for a single-property analysis. Unset flags fall back to the
/// calculator defaults (a $550k property at $250/night, 14.1 nights/month).
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Average nightly rate
    #[arg(long)]
    pub nightly_rate: Option<Decimal>,

    /// Average nights booked per month
    #[arg(long, alias = "nights")]
    pub nights_booked: Option<Decimal>,

    /// Annual appreciation rate (e.g. 0.03 for 3%)
    #[arg(long)]
    pub appreciation: Option<Decimal>,

    /// Loan interest rate (e.g. 0.065 for 6.5%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Down payment as a fraction of price (e.g. 0.10 for 10%)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub loan_term: Option<u32>,

    /// Annual property taxes
    #[arg(long)]
    pub taxes: Option<Decimal>,

    /// Annual insurance
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Annual maintenance
    #[arg(long)]
    pub maintenance: Option<Decimal>,

    /// Management fee as a fraction of rent (e.g. 0.20 for 20%)
    #[arg(long, alias = "mgmt-fee")]
    pub management_fee: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long, default_value = "15")]
    pub years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl AnalyzeArgs {
    fn into_input(self) -> RentalAnalysisInput {
        let defaults = RentalAssumptions::default();
        RentalAnalysisInput {
            assumptions: RentalAssumptions {
                purchase_price: self.purchase_price.unwrap_or(defaults.purchase_price),
                nightly_rate: self.nightly_rate.unwrap_or(defaults.nightly_rate),
                nights_booked_per_month: self
                    .nights_booked
                    .unwrap_or(defaults.nights_booked_per_month),
                annual_appreciation_rate: self
                    .appreciation
                    .unwrap_or(defaults.annual_appreciation_rate),
                interest_rate: self.interest_rate.unwrap_or(defaults.interest_rate),
                down_payment_pct: self.down_payment.unwrap_or(defaults.down_payment_pct),
                loan_term_years: self.loan_term.unwrap_or(defaults.loan_term_years),
                annual_taxes: self.taxes.unwrap_or(defaults.annual_taxes),
                annual_insurance: self.insurance.unwrap_or(defaults.annual_insurance),
                annual_maintenance: self.maintenance.unwrap_or(defaults.annual_maintenance),
                management_fee_rate: self
                    .management_fee
                    .unwrap_or(defaults.management_fee_rate),
            },
            horizon_years: self.years,
        }
    }
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: RentalAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        args.into_input()
    };
    let result = rental::analyze_rental(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn empty_args() -> AnalyzeArgs {
        AnalyzeArgs {
            purchase_price: None,
            nightly_rate: None,
            nights_booked: None,
            appreciation: None,
            interest_rate: None,
            down_payment: None,
            loan_term: None,
            taxes: None,
            insurance: None,
            maintenance: None,
            management_fee: None,
            years: 15,
            input: None,
        }
    }

    #[test]
    fn test_unset_flags_use_defaults() {
        assert_eq!(empty_args().into_input(), RentalAnalysisInput::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = AnalyzeArgs {
            nightly_rate: Some(dec!(300)),
            loan_term: Some(15),
            years: 10,
            ..empty_args()
        };
        let input = args.into_input();
        assert_eq!(input.assumptions.nightly_rate, dec!(300));
        assert_eq!(input.assumptions.loan_term_years, 15);
        assert_eq!(input.assumptions.purchase_price, dec!(550000));
        assert_eq!(input.horizon_years, 10);
    }
}
