use colored::Colorize;
use serde_json::Value;

use super::format::f64_of;

const BAR_WIDTH: usize = 40;

/// Extract (year, roi) points from serialized projection rows.
pub fn roi_points(projection: &[Value]) -> Vec<(u64, f64)> {
    projection
        .iter()
        .filter_map(|row| {
            let year = row.get("year")?.as_u64()?;
            let roi = f64_of(row.get("roi")?)?;
            Some((year, roi))
        })
        .collect()
}

/// Horizontal bar chart of ROI by year, scaled to the largest magnitude.
/// Negative years draw with `-` instead of `#`.
pub fn roi_chart_lines(points: &[(u64, f64)], width: usize) -> Vec<String> {
    let max_abs = points.iter().map(|(_, r)| r.abs()).fold(0.0_f64, f64::max);

    points
        .iter()
        .map(|&(year, roi)| {
            let len = if max_abs > 0.0 {
                ((roi.abs() / max_abs) * width as f64).round() as usize
            } else {
                0
            };
            let glyph = if roi < 0.0 { "-" } else { "#" };
            format!("{year:>4} | {:<width$} {roi:.2}", glyph.repeat(len))
        })
        .collect()
}

pub fn print_roi_chart(projection: &[Value]) {
    let points = roi_points(projection);
    if points.is_empty() {
        return;
    }

    println!("\nROI Projection (appreciation + cumulative cash flow / down payment):");
    for (line, (_, roi)) in roi_chart_lines(&points, BAR_WIDTH).iter().zip(&points) {
        if *roi < 0.0 {
            println!("{}", line.red());
        } else {
            println!("{}", line.green());
        }
    }
}
