use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Summary fields in display order with their labels.
pub const SUMMARY_LABELS: [(&str, &str); 10] = [
    ("monthly_rent", "Monthly Rent"),
    ("annual_rent", "Annual Rent"),
    ("down_payment", "Down Payment"),
    ("loan_amount", "Loan Amount"),
    ("monthly_mortgage_payment", "Monthly Mortgage"),
    ("annual_mortgage_payment", "Annual Mortgage"),
    ("management_fees", "Management Fees"),
    ("annual_expenses", "Annual Expenses"),
    ("annual_cash_flow", "Annual Cash Flow"),
    ("monthly_out_of_pocket", "Monthly Out-of-Pocket (if any)"),
];

/// Decimals arrive as JSON strings; plain numbers are accepted too.
pub fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

pub fn f64_of(value: &Value) -> Option<f64> {
    decimal_of(value).and_then(|d| d.to_f64())
}

/// Whole-dollar currency with thousands separators: `-$12,005`.
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(0);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(&rounded.abs().to_string()))
}

/// Fixed-point with `dp` decimals, e.g. ROI at 2dp.
pub fn fixed(amount: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, amount.round_dp(dp))
}

pub fn currency_value(value: &Value) -> String {
    decimal_of(value)
        .map(currency)
        .unwrap_or_else(|| plain(value))
}

pub fn fixed_value(value: &Value, dp: u32) -> String {
    decimal_of(value)
        .map(|d| fixed(d, dp))
        .unwrap_or_else(|| plain(value))
}

/// Untyped rendering for fields without a dedicated format.
pub fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(plain).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
