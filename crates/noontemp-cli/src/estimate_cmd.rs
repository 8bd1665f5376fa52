use std::process::ExitCode;

use noontemp_core::estimate_daily_report;
use tracing::info;

use crate::cli::EstimateArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{build_config, load_observations, parse_input_format};

pub fn run_estimate(args: EstimateArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let config = build_config(&args.anchors)?;
    let input_format = parse_input_format(&args.input_format)?;

    let loaded = load_observations(&args.input, input_format)?;
    let report = estimate_daily_report(&loaded.observations, &config);

    info!(
        days_seen = report.days_seen,
        retained = report.estimates.len(),
        interpolated = report.interpolated,
        malformed = report.stats.malformed,
        "Estimated daily temperatures"
    );

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report.estimates)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for estimate in &report.estimates {
                println!("{}: {:?}", estimate.date, estimate.temperature);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
