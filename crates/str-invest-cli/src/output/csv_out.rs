use serde_json::Value;
use std::io::{self, Write};

const PROJECTION_COLUMNS: [&str; 4] = [
    "year",
    "cumulative_appreciation",
    "cumulative_cash_flow",
    "roi",
];

/// Write output as CSV to stdout.
///
/// Analyses emit the projection rows, sensitivity grids emit the matrix with
/// the first axis as the leading column, anything else becomes field/value
/// pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value.get("result").unwrap_or(value);

    if let Some(Value::Array(rows)) = result.get("projection") {
        write_rows_csv(&mut wtr, &PROJECTION_COLUMNS, rows);
    } else if let Some(Value::Array(matrix)) = result.get("matrix") {
        write_matrix_csv(&mut wtr, result, matrix);
    } else if let Value::Object(map) = result {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_csv_value(result)]);
    }

    let _ = wtr.flush();
}

fn write_rows_csv<W: Write>(wtr: &mut csv::Writer<W>, headers: &[&str], arr: &[Value]) {
    let _ = wtr.write_record(headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn write_matrix_csv<W: Write>(wtr: &mut csv::Writer<W>, result: &Value, matrix: &[Value]) {
    let axis_1 = result
        .get("variable_1")
        .map(format_csv_value)
        .unwrap_or_default();
    let empty = Vec::new();
    let row_values = result
        .get("variable_1_values")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    let col_values = result
        .get("variable_2_values")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let mut header = vec![axis_1];
    header.extend(col_values.iter().map(format_csv_value));
    let _ = wtr.write_record(&header);

    for (row_value, cells) in row_values.iter().zip(matrix) {
        let mut record = vec![format_csv_value(row_value)];
        if let Value::Array(cells) = cells {
            record.extend(cells.iter().map(format_csv_value));
        }
        let _ = wtr.write_record(&record);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
