mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::rental::AnalyzeArgs;
use commands::sensitivity::SensitivityArgs;

/// Short-term rental investment calculator
#[derive(Parser)]
#[command(
    name = "strcalc",
    version,
    about = "Short-term rental cash flow and ROI calculator",
    long_about = "Estimates monthly rent, mortgage payment, operating cash flow and a \
                  year-by-year appreciation + cash-flow ROI projection for a short-term \
                  rental purchase. All arithmetic uses 128-bit decimals."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Cash flow summary and ROI projection for one property
    Analyze(AnalyzeArgs),
    /// Two-way sensitivity grid over any two assumptions
    Sensitivity(SensitivityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::rental::run_analyze(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Version => {
            println!("strcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
