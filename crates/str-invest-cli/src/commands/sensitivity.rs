use clap::Args;
use serde_json::Value;

use str_invest_core::rental::sensitivity::{self, RentalSensitivityInput};

use crate::input;

/// Arguments for a two-way sensitivity grid
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON input file with the base case, both axes and the metric
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let grid_input: RentalSensitivityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for sensitivity analysis".into());
    };
    let result = sensitivity::rental_sensitivity(&grid_input)?;
    Ok(serde_json::to_value(result)?)
}
