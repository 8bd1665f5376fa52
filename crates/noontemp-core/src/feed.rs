//! Typed inbound provider documents.
//!
//! The MET Norway `locationforecast/2.0/compact` response nests the
//! readings as `properties.timeseries[].data.instant.details.air_temperature`
//! keyed by `properties.timeseries[].time`. Each time step is validated on
//! its own so that one bad entry costs one observation, not the document.
//!
//! A newline-delimited stream of [`Observation`] objects is accepted as an
//! alternative input with the same per-record tolerance.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{NoonTempError, Result};
use crate::models::Observation;

/// Top-level provider document.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    pub properties: ForecastProperties,
}

/// GeoJSON point, `[longitude, latitude, altitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub meta: Option<ForecastMeta>,
    /// Raw steps, validated individually by [`Forecast::observations`].
    pub timeseries: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastMeta {
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One validated time step.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeStep {
    pub time: String,
    pub data: TimeStepData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeStepData {
    pub instant: InstantData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstantData {
    pub details: InstantDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstantDetails {
    #[serde(default)]
    pub air_temperature: Option<f64>,
}

/// Counters for records read from an input document or stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    /// Records seen.
    pub records: usize,
    /// Records dropped at the boundary.
    pub rejected: usize,
}

impl TimeStep {
    fn into_observation(self) -> Option<Observation> {
        self.data
            .instant
            .details
            .air_temperature
            .map(|temperature| Observation::new(self.time, temperature))
    }
}

impl Forecast {
    /// Parse a provider document.
    ///
    /// Fails only when the text is not JSON or lacks `properties.timeseries`.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map_err(|e| NoonTempError::Feed(format!("Invalid forecast document: {}", e)))
    }

    /// Latitude and longitude of the forecast point, when present.
    pub fn location(&self) -> Option<(f64, f64)> {
        match self.geometry.as_ref()?.coordinates.as_slice() {
            [lon, lat, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.properties.meta.as_ref()?.updated_at.as_deref()
    }

    /// Extract observations, skipping steps with a missing or mistyped field.
    pub fn observations(&self) -> (Vec<Observation>, FeedStats) {
        let mut stats = FeedStats::default();
        let mut observations = Vec::with_capacity(self.properties.timeseries.len());

        for (position, raw) in self.properties.timeseries.iter().enumerate() {
            stats.records += 1;

            let step = match TimeStep::deserialize(raw) {
                Ok(step) => step,
                Err(e) => {
                    warn!(position, "Rejecting forecast step: {}", e);
                    stats.rejected += 1;
                    continue;
                }
            };

            let time = step.time.clone();
            match step.into_observation() {
                Some(observation) => observations.push(observation),
                None => {
                    warn!(position, %time, "Rejecting forecast step without air_temperature");
                    stats.rejected += 1;
                }
            }
        }

        debug!(
            records = stats.records,
            rejected = stats.rejected,
            "Extracted forecast observations"
        );
        (observations, stats)
    }
}

/// Parse newline-delimited JSON observations, skipping blank and invalid lines.
///
/// # Examples
///
/// ```
/// use noontemp_core::feed::parse_observation_stream;
///
/// let input = r#"{"timestamp": "2024-01-01T06:00:00Z", "temperature": -3.0}
/// not json
/// {"timestamp": "2024-01-01T12:00:00Z", "temperature": 5.0}"#;
/// let (observations, stats) = parse_observation_stream(input);
///
/// assert_eq!(observations.len(), 2);
/// assert_eq!(stats.rejected, 1);
/// ```
pub fn parse_observation_stream(input: &str) -> (Vec<Observation>, FeedStats) {
    let mut stats = FeedStats::default();
    let mut observations = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.records += 1;

        match serde_json::from_str::<Observation>(trimmed) {
            Ok(observation) => observations.push(observation),
            Err(e) => {
                warn!(line = number + 1, "Rejecting observation line: {}", e);
                stats.rejected += 1;
            }
        }
    }

    (observations, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [37.6173, 55.7558, 144] },
        "properties": {
            "meta": { "updated_at": "2024-01-01T04:12:31Z", "units": { "air_temperature": "celsius" } },
            "timeseries": [
                { "time": "2024-01-01T06:00:00Z", "data": { "instant": { "details": { "air_temperature": -3.0, "wind_speed": 2.1 } } } },
                { "time": "2024-01-01T11:00:00Z", "data": { "instant": { "details": { "air_temperature": "warm" } } } },
                { "time": "2024-01-01T12:00:00Z", "data": { "instant": { "details": {} } } },
                { "time": "2024-01-01T18:00:00Z" },
                { "time": "2024-01-02T06:00:00Z", "data": { "instant": { "details": { "air_temperature": 1.5 } } } }
            ]
        }
    }"#;

    #[test]
    fn extracts_valid_steps_and_counts_rejects() {
        let forecast = Forecast::from_json(DOCUMENT).unwrap();
        let (observations, stats) = forecast.observations();

        assert_eq!(
            observations,
            vec![
                Observation::new("2024-01-01T06:00:00Z", -3.0),
                Observation::new("2024-01-02T06:00:00Z", 1.5),
            ]
        );
        assert_eq!(stats.records, 5);
        assert_eq!(stats.rejected, 3);
    }

    #[test]
    fn exposes_location_and_update_time() {
        let forecast = Forecast::from_json(DOCUMENT).unwrap();
        assert_eq!(forecast.location(), Some((55.7558, 37.6173)));
        assert_eq!(forecast.updated_at(), Some("2024-01-01T04:12:31Z"));
    }

    #[test]
    fn missing_geometry_is_tolerated() {
        let forecast = Forecast::from_json(r#"{"properties": {"timeseries": []}}"#).unwrap();
        assert_eq!(forecast.location(), None);
        assert_eq!(forecast.updated_at(), None);
        let (observations, stats) = forecast.observations();
        assert!(observations.is_empty());
        assert_eq!(stats, FeedStats::default());
    }

    #[test]
    fn rejects_document_without_timeseries() {
        let result = Forecast::from_json(r#"{"properties": {}}"#);
        assert!(matches!(result, Err(NoonTempError::Feed(_))));
        assert!(Forecast::from_json("<html>").is_err());
    }

    #[test]
    fn observation_stream_skips_bad_lines() {
        let input = concat!(
            "{\"timestamp\": \"2024-01-01T06:00:00Z\", \"temperature\": -3.0}\n",
            "\n",
            "{\"timestamp\": \"2024-01-01T12:00:00Z\"}\n",
            "{\"timestamp\": \"2024-01-01T12:00:00Z\", \"temperature\": 5.0}\n",
        );
        let (observations, stats) = parse_observation_stream(input);

        assert_eq!(observations.len(), 2);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.rejected, 1);
    }
}
