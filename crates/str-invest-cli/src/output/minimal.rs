use serde_json::Value;

use super::format::plain;

/// Print just the key answer value from the output.
///
/// Looks for well-known headline fields in the result (and its nested
/// summary), then falls back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "annual_cash_flow",
        "base_case_value",
        "monthly_out_of_pocket",
        "monthly_mortgage_payment",
    ];

    let scopes = [Some(result_obj), result_obj.get("summary")];
    for scope in scopes.into_iter().flatten() {
        if let Value::Object(map) = scope {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        return plain(val);
                    }
                }
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, plain(val));
        }
    }

    plain(result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_headline_is_cash_flow() {
        let value = json!({
            "result": {
                "summary": {"annual_cash_flow": "-12004.84", "monthly_rent": "3525.0"},
                "projection": [],
            }
        });
        assert_eq!(headline(&value), "-12004.84");
    }

    #[test]
    fn test_sensitivity_headline_is_base_case() {
        let value = json!({"result": {"base_case_value": "1.5", "matrix": []}});
        assert_eq!(headline(&value), "1.5");
    }
}
