use std::process::ExitCode;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use noontemp_core::{DayResolution, explain_days};
use serde::Serialize;

use crate::cli::ExplainArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{
    build_config, format_reading, format_rfc3339, load_observations, parse_input_format,
    parse_tz_or_input_error,
};

pub fn run_explain(args: ExplainArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let tz = parse_tz_or_input_error(&args.tz)?;
    let config = build_config(&args.anchors)?;
    let input_format = parse_input_format(&args.input_format)?;

    let loaded = load_observations(&args.input, input_format)?;
    let days = explain_days(&loaded.observations, &config)
        .into_iter()
        .map(|resolution| ExplainDay {
            target_local: target_in_zone(resolution.date, config.target(), tz),
            resolution,
        })
        .collect();

    let result = ExplainResult {
        tz: tz.to_string(),
        location: loaded.location.map(|(latitude, longitude)| Location {
            latitude,
            longitude,
        }),
        days,
    };

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Timezone: {}", result.tz);
            if let Some(location) = &result.location {
                println!("Location: {}, {}", location.latitude, location.longitude);
            }
            for day in &result.days {
                let r = &day.resolution;
                println!(
                    "{}: early={} late={} target={} -> {} (target at {})",
                    r.date,
                    format_reading(r.early),
                    format_reading(r.late),
                    format_reading(r.target),
                    r.outcome,
                    day.target_local
                );
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct ExplainResult {
    tz: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    days: Vec<ExplainDay>,
}

#[derive(Debug, Serialize)]
struct Location {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct ExplainDay {
    #[serde(flatten)]
    resolution: DayResolution,
    /// Target instant (taken as UTC) rendered in the display zone.
    target_local: String,
}

/// Anchor labels are UTC wall-clock times; show where the target lands locally.
fn target_in_zone(date: NaiveDate, target: NaiveTime, tz: Tz) -> String {
    let instant = Utc.from_utc_datetime(&date.and_time(target));
    format_rfc3339(&instant.with_timezone(&tz))
}
