use std::fs;
use std::io::{self, Read};

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use noontemp_core::{
    AnchorConfig, FeedStats, Forecast, Observation, RetentionPolicy, Rounding, parse_anchor_time,
    parse_observation_stream,
};
use tracing::{debug, info};

use crate::cli::AnchorArgs;
use crate::error::{CliError, CliResult};

/// Shape of the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// MET Norway locationforecast JSON document.
    Metno,
    /// Newline-delimited `{"timestamp", "temperature"}` objects.
    Observations,
}

/// Observations read from the input, with what the boundary dropped.
#[derive(Debug)]
pub struct LoadedInput {
    pub observations: Vec<Observation>,
    pub stats: FeedStats,
    /// `(latitude, longitude)` of a forecast document.
    pub location: Option<(f64, f64)>,
}

pub fn parse_input_format(s: &str) -> CliResult<InputFormat> {
    match s.to_lowercase().as_str() {
        "metno" => Ok(InputFormat::Metno),
        "observations" => Ok(InputFormat::Observations),
        _ => Err(CliError::input(format!(
            "Invalid input_format '{}'. Expected: metno, observations",
            s
        ))),
    }
}

pub fn parse_rounding(s: &str) -> CliResult<Rounding> {
    s.parse::<Rounding>().map_err(|_| {
        CliError::input(format!(
            "Invalid rounding '{}'. Expected: half_away_from_zero, half_even",
            s
        ))
    })
}

pub fn parse_retention(s: &str) -> CliResult<RetentionPolicy> {
    s.parse::<RetentionPolicy>().map_err(|_| {
        CliError::input(format!(
            "Invalid retention '{}'. Expected: bracketed, exact_or_bracketed",
            s
        ))
    })
}

/// Build and validate the engine config from command-line flags.
pub fn build_config(args: &AnchorArgs) -> CliResult<AnchorConfig> {
    let early = parse_anchor_time(&args.early)
        .map_err(|e| CliError::input(format!("Invalid early anchor: {}", e)))?;
    let late = parse_anchor_time(&args.late)
        .map_err(|e| CliError::input(format!("Invalid late anchor: {}", e)))?;
    let target = parse_anchor_time(&args.target)
        .map_err(|e| CliError::input(format!("Invalid target time: {}", e)))?;

    let config = AnchorConfig::new(early, late, target)?
        .with_precision(args.precision)?
        .with_rounding(parse_rounding(&args.rounding)?)
        .with_retention(parse_retention(&args.retention)?);

    debug!(?config, "Resolved anchor config");
    Ok(config)
}

fn read_input(path: &str) -> CliResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::runtime(format!("Failed to read stdin: {}", e)))?;
        Ok(buffer)
    } else {
        fs::read_to_string(path)
            .map_err(|e| CliError::runtime(format!("Failed to open file '{}': {}", path, e)))
    }
}

/// Read the input and extract observations in the requested format.
pub fn load_observations(path: &str, format: InputFormat) -> CliResult<LoadedInput> {
    let content = read_input(path)?;

    let loaded = match format {
        InputFormat::Metno => {
            let forecast = Forecast::from_json(&content)?;
            if let Some(updated_at) = forecast.updated_at() {
                debug!(updated_at, "Forecast document metadata");
            }
            let (observations, stats) = forecast.observations();
            LoadedInput {
                observations,
                stats,
                location: forecast.location(),
            }
        }
        InputFormat::Observations => {
            let (observations, stats) = parse_observation_stream(&content);
            LoadedInput {
                observations,
                stats,
                location: None,
            }
        }
    };

    info!(
        input = path,
        records = loaded.stats.records,
        rejected = loaded.stats.rejected,
        "Loaded observations"
    );
    Ok(loaded)
}

pub fn format_rfc3339<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

pub fn parse_tz_or_input_error(name: &str) -> CliResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CliError::input(format!("Invalid timezone '{}'", name)))
}

/// Render an optional reading for text output.
pub fn format_reading(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "-".to_string(),
    }
}
