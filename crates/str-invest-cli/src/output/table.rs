use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::chart;
use super::format::{currency_value, fixed_value, plain, SUMMARY_LABELS};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            match map.get("result") {
                Some(result) if result.get("summary").is_some() => {
                    print_analysis(result);
                }
                Some(result) if result.get("matrix").is_some() => {
                    print_sensitivity(result);
                }
                Some(result) => print_flat_object(result),
                None => print_flat_object(value),
            }
            print_envelope_notes(map);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_analysis(result: &Value) {
    if let Some(summary) = result.get("summary") {
        println!("Results");
        println!("{}", summary_table(summary));
    }

    if let Some(Value::Array(rows)) = result.get("projection") {
        println!("\nROI Projection");
        println!("{}", projection_table(rows));
        chart::print_roi_chart(rows);
    }
}

/// Labeled metrics, whole-dollar currency.
pub fn summary_table(summary: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    for (key, label) in SUMMARY_LABELS {
        if let Some(val) = summary.get(key) {
            builder.push_record([label.to_string(), currency_value(val)]);
        }
    }
    builder.build()
}

/// Year-by-year rows: currency for the dollar columns, ROI to 2dp.
pub fn projection_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Year", "Appreciation ($)", "Cash Flow ($)", "ROI"]);
    for row in rows {
        let cell = |key: &str| row.get(key).cloned().unwrap_or(Value::Null);
        builder.push_record([
            plain(&cell("year")),
            currency_value(&cell("cumulative_appreciation")),
            currency_value(&cell("cumulative_cash_flow")),
            fixed_value(&cell("roi"), 2),
        ]);
    }
    builder.build()
}

fn print_sensitivity(result: &Value) {
    let axis_1 = result.get("variable_1").map(plain).unwrap_or_default();
    let axis_2 = result.get("variable_2").map(plain).unwrap_or_default();
    let metric = result.get("output_metric").map(plain).unwrap_or_default();

    let empty = Vec::new();
    let row_values = result
        .get("variable_1_values")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    let col_values = result
        .get("variable_2_values")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    let matrix = result
        .get("matrix")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let roi_metric = metric == "roi_at_horizon";
    let render = |v: &Value| {
        if roi_metric {
            fixed_value(v, 2)
        } else {
            currency_value(v)
        }
    };

    println!("{metric} by {axis_1} (rows) x {axis_2} (columns)");

    let mut builder = Builder::default();
    let mut header = vec![format!("{axis_1} \\ {axis_2}")];
    header.extend(col_values.iter().map(plain));
    builder.push_record(header);

    for (row_value, cells) in row_values.iter().zip(matrix) {
        let mut record = vec![plain(row_value)];
        if let Value::Array(cells) = cells {
            record.extend(cells.iter().map(render));
        }
        builder.push_record(record);
    }
    println!("{}", builder.build());

    if let Some(base) = result.get("base_case_value") {
        println!("Base case: {}", render(base));
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &plain(val)]);
        }
        println!("{}", builder.build());
    } else {
        println!("{}", plain(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_table_labels_and_currency() {
        let summary = json!({
            "monthly_rent": "3525.0",
            "loan_amount": "495000.00",
            "annual_cash_flow": "-12004.84",
        });
        let rendered = summary_table(&summary).to_string();
        assert!(rendered.contains("Monthly Rent"));
        assert!(rendered.contains("$3,525"));
        assert!(rendered.contains("$495,000"));
        assert!(rendered.contains("-$12,005"));
        // Fields absent from the summary are skipped
        assert!(!rendered.contains("Down Payment"));
    }

    #[test]
    fn test_projection_table_formats_columns() {
        let rows = vec![json!({
            "year": 1,
            "cumulative_appreciation": "16500.00",
            "cumulative_cash_flow": "-12004.84",
            "roi": "0.08173",
        })];
        let rendered = projection_table(&rows).to_string();
        assert!(rendered.contains("Appreciation ($)"));
        assert!(rendered.contains("$16,500"));
        assert!(rendered.contains("-$12,005"));
        assert!(rendered.contains("0.08"));
    }
}
