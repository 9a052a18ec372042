use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::StrInvestError;
use crate::rental::{compute_summary, project_roi, RentalAnalysisInput, RentalAssumptions};
use crate::types::{with_metadata, ComputationOutput, SensitivityVariable};
use crate::StrInvestResult;

const MAX_GRID_CELLS: usize = 10_000;

/// Assumption that can be swept along a sensitivity axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalVariable {
    PurchasePrice,
    NightlyRate,
    NightsBookedPerMonth,
    AnnualAppreciationRate,
    InterestRate,
    DownPaymentPct,
    ManagementFeeRate,
}

impl RentalVariable {
    fn value(self, a: &RentalAssumptions) -> Decimal {
        match self {
            RentalVariable::PurchasePrice => a.purchase_price,
            RentalVariable::NightlyRate => a.nightly_rate,
            RentalVariable::NightsBookedPerMonth => a.nights_booked_per_month,
            RentalVariable::AnnualAppreciationRate => a.annual_appreciation_rate,
            RentalVariable::InterestRate => a.interest_rate,
            RentalVariable::DownPaymentPct => a.down_payment_pct,
            RentalVariable::ManagementFeeRate => a.management_fee_rate,
        }
    }

    fn set(self, a: &mut RentalAssumptions, v: Decimal) {
        match self {
            RentalVariable::PurchasePrice => a.purchase_price = v,
            RentalVariable::NightlyRate => a.nightly_rate = v,
            RentalVariable::NightsBookedPerMonth => a.nights_booked_per_month = v,
            RentalVariable::AnnualAppreciationRate => a.annual_appreciation_rate = v,
            RentalVariable::InterestRate => a.interest_rate = v,
            RentalVariable::DownPaymentPct => a.down_payment_pct = v,
            RentalVariable::ManagementFeeRate => a.management_fee_rate = v,
        }
    }
}

/// Figure read off each grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalMetric {
    AnnualCashFlow,
    MonthlyOutOfPocket,
    /// ROI in the final year of the horizon
    RoiAtHorizon,
}

/// One axis of the grid: which assumption to vary and over what range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityAxis {
    pub variable: RentalVariable,
    #[serde(flatten)]
    pub range: SensitivityVariable,
}

/// Input for 2-way rental sensitivity analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalSensitivityInput {
    /// Base case the grid varies around
    #[serde(default)]
    pub base: RentalAnalysisInput,
    pub variable_1: SensitivityAxis,
    pub variable_2: SensitivityAxis,
    pub output_metric: RentalMetric,
}

/// Output of 2-way rental sensitivity analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalSensitivityOutput {
    pub variable_1: RentalVariable,
    pub variable_2: RentalVariable,
    pub variable_1_values: Vec<Decimal>,
    pub variable_2_values: Vec<Decimal>,
    pub output_metric: RentalMetric,
    /// Matrix[i][j] = output when variable_1 = variable_1_values[i], variable_2 = variable_2_values[j]
    pub matrix: Vec<Vec<Decimal>>,
    /// Output at the unmodified base assumptions
    pub base_case_value: Decimal,
    /// Grid cell closest to the base assumptions (row, col)
    pub base_case_position: (usize, usize),
}

/// Generate the sweep values for an axis from min to max with step.
fn generate_sweep_values(axis: &SensitivityAxis) -> StrInvestResult<Vec<Decimal>> {
    let range = &axis.range;
    if range.step <= Decimal::ZERO {
        return Err(StrInvestError::InvalidInput {
            field: format!("variable:{:?}", axis.variable),
            reason: "Step must be positive".into(),
        });
    }
    if range.min > range.max {
        return Err(StrInvestError::InvalidInput {
            field: format!("variable:{:?}", axis.variable),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = range.min;
    while current <= range.max {
        values.push(current);
        if values.len() > MAX_GRID_CELLS {
            return Err(StrInvestError::InvalidInput {
                field: format!("variable:{:?}", axis.variable),
                reason: format!("Sweep produces more than {MAX_GRID_CELLS} values"),
            });
        }
        // Past the decimal range there is nothing left before max but max itself
        match current.checked_add(range.step) {
            Some(next) => current = next,
            None => break,
        }
    }
    // Ensure max is included if step doesn't land exactly on it
    if let Some(&last) = values.last() {
        if last < range.max {
            values.push(range.max);
        }
    }

    Ok(values)
}

/// Find the closest index to a target value.
fn closest_index(values: &[Decimal], target: Decimal) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| {
            v.checked_sub(target)
                .map_or(Decimal::MAX, |distance| distance.abs())
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn evaluate(
    assumptions: &RentalAssumptions,
    horizon_years: u32,
    metric: RentalMetric,
) -> StrInvestResult<Decimal> {
    let summary = compute_summary(assumptions)?;
    match metric {
        RentalMetric::AnnualCashFlow => Ok(summary.annual_cash_flow),
        RentalMetric::MonthlyOutOfPocket => Ok(summary.monthly_out_of_pocket),
        RentalMetric::RoiAtHorizon => {
            // A valid horizon always yields at least one row
            let rows = project_roi(assumptions, &summary, horizon_years)?;
            Ok(rows.last().map_or(Decimal::ZERO, |r| r.roi))
        }
    }
}

/// Evaluate a 2-way sensitivity grid over two rental assumptions.
///
/// Every cell re-runs the summary (and projection, for ROI) on a copy of the
/// base assumptions with the two swept values substituted.
pub fn rental_sensitivity(
    input: &RentalSensitivityInput,
) -> StrInvestResult<ComputationOutput<RentalSensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.variable_1.variable == input.variable_2.variable {
        return Err(StrInvestError::InvalidInput {
            field: "variable_2".into(),
            reason: "Sensitivity axes must vary different assumptions".into(),
        });
    }

    let v1_values = generate_sweep_values(&input.variable_1)?;
    let v2_values = generate_sweep_values(&input.variable_2)?;

    if v1_values.len() == 1 && v2_values.len() == 1 {
        return Err(StrInvestError::InsufficientData(
            "Both sensitivity axes hold a single value; nothing to sweep".into(),
        ));
    }

    if v1_values.len() * v2_values.len() > MAX_GRID_CELLS {
        return Err(StrInvestError::InvalidInput {
            field: "variable_1".into(),
            reason: format!("Grid exceeds {MAX_GRID_CELLS} cells"),
        });
    }

    let base = &input.base.assumptions;
    let horizon = input.base.horizon_years;
    let (var1, var2) = (input.variable_1.variable, input.variable_2.variable);

    let base_case_value = evaluate(base, horizon, input.output_metric)?;

    let mut matrix = Vec::with_capacity(v1_values.len());
    for v1 in &v1_values {
        let mut row = Vec::with_capacity(v2_values.len());
        for v2 in &v2_values {
            let mut scenario = base.clone();
            var1.set(&mut scenario, *v1);
            var2.set(&mut scenario, *v2);

            match evaluate(&scenario, horizon, input.output_metric) {
                Ok(val) => row.push(val),
                Err(e) => {
                    warnings.push(format!("Evaluation failed at ({v1}, {v2}): {e}"));
                    row.push(Decimal::ZERO);
                }
            }
        }
        matrix.push(row);
    }

    let base_row = closest_index(&v1_values, var1.value(base));
    let base_col = closest_index(&v2_values, var2.value(base));

    let output = RentalSensitivityOutput {
        variable_1: var1,
        variable_2: var2,
        variable_1_values: v1_values,
        variable_2_values: v2_values,
        output_metric: input.output_metric,
        matrix,
        base_case_value,
        base_case_position: (base_row, base_col),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "2-Way Rental Sensitivity Analysis",
        input,
        warnings,
        elapsed,
        output,
    ))
}
