use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use str_invest_core::rental::{
    analyze_rental, compute_summary, project_roi, RentalAnalysisInput, RentalAssumptions,
    DEFAULT_HORIZON_YEARS,
};
use str_invest_core::time_value::compound_factor;
use str_invest_core::StrInvestError;

// ===========================================================================
// Reference scenario (calculator defaults)
// ===========================================================================

#[test]
fn test_default_scenario_end_to_end() {
    let a = RentalAssumptions::default();
    let s = compute_summary(&a).unwrap();

    assert_eq!(s.monthly_rent, dec!(3525));
    assert_eq!(s.annual_rent, dec!(42300));
    assert_eq!(s.down_payment, dec!(55000));
    assert_eq!(s.loan_amount, dec!(495000));

    // Annuity formula: 495000 * r / (1 - (1+r)^-360), r = 0.065/12 ≈ 3128.75
    let r = dec!(0.065) / dec!(12);
    let growth = compound_factor(r, 360).unwrap();
    let expected_payment = dec!(495000) * r * growth / (growth - Decimal::ONE);
    assert!(
        (s.monthly_mortgage_payment - expected_payment).abs() < dec!(0.01),
        "Payment {} vs annuity formula {expected_payment}",
        s.monthly_mortgage_payment
    );
    assert!((s.monthly_mortgage_payment - dec!(3129)).abs() < dec!(1));

    let expected_expenses =
        s.annual_mortgage_payment + dec!(4000) + dec!(1800) + dec!(2500) + dec!(8460);
    assert_eq!(s.annual_expenses, expected_expenses);
    assert_eq!(s.annual_cash_flow, dec!(42300) - expected_expenses);

    // ≈ -12,005 per year, ≈ 1,000 per month out of pocket
    assert!(s.annual_cash_flow < Decimal::ZERO);
    assert!(
        (s.monthly_out_of_pocket - dec!(1000.41)).abs() < dec!(1),
        "Out of pocket {}",
        s.monthly_out_of_pocket
    );
}

#[test]
fn test_default_projection_year_one_and_fifteen() {
    let a = RentalAssumptions::default();
    let s = compute_summary(&a).unwrap();
    let rows = project_roi(&a, &s, DEFAULT_HORIZON_YEARS).unwrap();

    assert_eq!(rows.len(), 15);
    assert_eq!(rows[0].cumulative_appreciation, dec!(16500));

    let year_15 = dec!(550000) * (compound_factor(dec!(0.03), 15).unwrap() - Decimal::ONE);
    assert!((rows[14].cumulative_appreciation - year_15).abs() < dec!(0.000001));

    // Appreciation outruns the cumulative shortfall, so ROI ends positive
    assert!(rows[14].roi > Decimal::ZERO);
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_determinism() {
    let input = RentalAnalysisInput::default();
    let first = analyze_rental(&input).unwrap().result;
    let second = analyze_rental(&input).unwrap().result;

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.projection, second.projection);
}

#[test]
fn test_zero_interest_payment_is_straight_line() {
    let a = RentalAssumptions {
        interest_rate: Decimal::ZERO,
        loan_term_years: 15,
        ..Default::default()
    };
    let s = compute_summary(&a).unwrap();
    assert_eq!(s.monthly_mortgage_payment, dec!(495000) / dec!(180));
    assert_eq!(s.monthly_mortgage_payment, dec!(2750));
}

#[test]
fn test_out_of_pocket_sign_consistency() {
    for nightly_rate in [dec!(0), dec!(150), dec!(250), dec!(350), dec!(450), dec!(600)] {
        let a = RentalAssumptions {
            nightly_rate,
            ..Default::default()
        };
        let s = compute_summary(&a).unwrap();

        assert!(s.monthly_out_of_pocket >= Decimal::ZERO);
        assert_eq!(
            s.monthly_out_of_pocket > Decimal::ZERO,
            s.annual_cash_flow < Decimal::ZERO,
            "nightly rate {nightly_rate}"
        );
    }
}

#[test]
fn test_projection_length_matches_horizon() {
    let a = RentalAssumptions::default();
    let s = compute_summary(&a).unwrap();
    for horizon in [1u32, 5, 15, 40] {
        let rows = project_roi(&a, &s, horizon).unwrap();
        assert_eq!(rows.len(), horizon as usize);
        let years: Vec<u32> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, (1..=horizon).collect::<Vec<_>>());
    }
}

// ===========================================================================
// Edge scenarios
// ===========================================================================

#[test]
fn test_negative_cash_flow_scenario() {
    let a = RentalAssumptions {
        nightly_rate: dec!(100),
        nights_booked_per_month: dec!(8),
        annual_maintenance: dec!(6000),
        ..Default::default()
    };
    let s = compute_summary(&a).unwrap();

    assert!(s.annual_expenses > s.annual_rent);
    assert!(s.annual_cash_flow < Decimal::ZERO);
    assert_eq!(s.monthly_out_of_pocket, -s.annual_cash_flow / dec!(12));
}

#[test]
fn test_zero_down_payment_summary_ok_projection_fails() {
    let a = RentalAssumptions {
        down_payment_pct: Decimal::ZERO,
        ..Default::default()
    };
    let s = compute_summary(&a).unwrap();
    assert_eq!(s.loan_amount, a.purchase_price);
    assert_eq!(s.down_payment, Decimal::ZERO);

    let err = project_roi(&a, &s, DEFAULT_HORIZON_YEARS).unwrap_err();
    assert!(
        matches!(err, StrInvestError::DivisionByZero { .. }),
        "Expected DivisionByZero, got {err:?}"
    );
}

#[test]
fn test_zero_appreciation_roi_is_cash_flow_only() {
    let a = RentalAssumptions {
        annual_appreciation_rate: Decimal::ZERO,
        ..Default::default()
    };
    let s = compute_summary(&a).unwrap();
    let rows = project_roi(&a, &s, 3).unwrap();

    for row in &rows {
        assert_eq!(row.cumulative_appreciation, Decimal::ZERO);
        assert_eq!(row.roi, row.cumulative_cash_flow / s.down_payment);
    }
}

#[test]
fn test_extreme_inputs_return_errors_not_panics() {
    // 500% interest still produces a (ruinous) interest-only payment
    let input = RentalAnalysisInput {
        assumptions: RentalAssumptions {
            interest_rate: dec!(5),
            ..Default::default()
        },
        horizon_years: DEFAULT_HORIZON_YEARS,
    };
    let result = analyze_rental(&input).unwrap();
    assert!(result.result.summary.annual_cash_flow < dec!(-2000000));

    let too_long = RentalAnalysisInput {
        horizon_years: 3000,
        ..Default::default()
    };
    match analyze_rental(&too_long).unwrap_err() {
        StrInvestError::InvalidInput { field, .. } => assert_eq!(field, "horizon_years"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

// ===========================================================================
// Serialization
// ===========================================================================

#[test]
fn test_input_json_uses_defaults_for_missing_horizon() {
    let json = r#"{
        "purchase_price": "550000",
        "nightly_rate": "250",
        "nights_booked_per_month": "14.1",
        "annual_appreciation_rate": "0.03",
        "interest_rate": "0.065",
        "down_payment_pct": "0.10",
        "loan_term_years": 30,
        "annual_taxes": "4000",
        "annual_insurance": "1800",
        "annual_maintenance": "2500",
        "management_fee_rate": "0.20"
    }"#;
    let input: RentalAnalysisInput = serde_json::from_str(json).unwrap();
    assert_eq!(input, RentalAnalysisInput::default());
}

#[test]
fn test_output_serializes_decimals_as_strings() {
    let result = analyze_rental(&RentalAnalysisInput::default()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["result"]["summary"]["monthly_rent"], "3525.0");
    assert_eq!(value["result"]["projection"][0]["year"], 1);
    assert_eq!(value["metadata"]["precision"], "rust_decimal_128bit");
}
