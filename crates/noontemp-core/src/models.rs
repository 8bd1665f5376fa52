//! Core data types for noontemp.
//!
//! This module defines the primary types used throughout the library:
//! - [`Observation`] - One raw timestamped temperature reading
//! - [`Anchor`] - The three fixed times of day the engine looks for
//! - [`AnchorConfig`] - Anchor times plus rounding and retention settings
//! - [`RetentionPolicy`] - Which days survive assembly
//! - [`AnchorSet`] - Per-date anchor values collected by the bucketer
//! - [`DailyEstimate`] - The engine's output unit
//! - [`DayOutcome`] / [`DayResolution`] - Per-date terminal state

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{NoonTempError, Result};
use crate::round::Rounding;

const fn anchor_time(hour: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, 0, 0) {
        Some(time) => time,
        None => panic!("anchor hour out of range"),
    }
}

/// Default early anchor (06:00), the provider's 6-hour cadence point before noon.
pub const DEFAULT_EARLY: NaiveTime = anchor_time(6);
/// Default late anchor (12:00).
pub const DEFAULT_LATE: NaiveTime = anchor_time(12);
/// Default target time (11:00 UTC, 14:00 at UTC+3).
pub const DEFAULT_TARGET: NaiveTime = anchor_time(11);
/// Default number of decimal digits kept for interpolated values.
pub const DEFAULT_PRECISION: u32 = 1;
/// Largest supported rounding precision.
pub const MAX_PRECISION: u32 = 6;

/// One raw input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Combined ISO-8601 date-time key (e.g. `2024-01-01T06:00:00Z`).
    pub timestamp: String,
    /// Instantaneous air temperature.
    pub temperature: f64,
}

impl Observation {
    pub fn new(timestamp: impl Into<String>, temperature: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature,
        }
    }
}

/// One of the three anchor slots of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Bracketing anchor before the target.
    Early,
    /// Bracketing anchor after the target.
    Late,
    /// The time whose value becomes the day's estimate.
    Target,
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anchor::Early => write!(f, "early"),
            Anchor::Late => write!(f, "late"),
            Anchor::Target => write!(f, "target"),
        }
    }
}

/// Which days the assembler keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep a day only when both bracketing anchors were observed. An exact
    /// target reading still wins over interpolation, but cannot keep a day
    /// on its own.
    #[default]
    Bracketed,
    /// Additionally keep days whose target was observed exactly, even with
    /// a bracketing anchor missing.
    ExactOrBracketed,
}

impl std::fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetentionPolicy::Bracketed => write!(f, "bracketed"),
            RetentionPolicy::ExactOrBracketed => write!(f, "exact_or_bracketed"),
        }
    }
}

impl FromStr for RetentionPolicy {
    type Err = NoonTempError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bracketed" => Ok(RetentionPolicy::Bracketed),
            "exact_or_bracketed" => Ok(RetentionPolicy::ExactOrBracketed),
            _ => Err(NoonTempError::ParseError(format!(
                "Unknown retention policy: '{}'. Expected 'bracketed' or 'exact_or_bracketed'",
                s
            ))),
        }
    }
}

/// Anchor times and numeric policy for one engine run.
///
/// Defaults reproduce the provider cadence: early `06:00`, late `12:00`,
/// target `11:00`, one decimal digit, half-away-from-zero rounding and
/// [`RetentionPolicy::Bracketed`].
///
/// Fields are private so that every config in circulation went through
/// [`AnchorConfig::new`] or a `with_*` method and therefore validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorConfig {
    early: NaiveTime,
    late: NaiveTime,
    target: NaiveTime,
    /// Decimal digits kept for interpolated values.
    precision: u32,
    rounding: Rounding,
    retention: RetentionPolicy,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            early: DEFAULT_EARLY,
            late: DEFAULT_LATE,
            target: DEFAULT_TARGET,
            precision: DEFAULT_PRECISION,
            rounding: Rounding::default(),
            retention: RetentionPolicy::default(),
        }
    }
}

impl AnchorConfig {
    /// Build a config from anchor times, keeping the default numeric policy.
    ///
    /// Returns [`NoonTempError::InvalidConfig`] unless `early < target < late`.
    pub fn new(early: NaiveTime, late: NaiveTime, target: NaiveTime) -> Result<Self> {
        let config = Self {
            early,
            late,
            target,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_precision(mut self, precision: u32) -> Result<Self> {
        self.precision = precision;
        self.validate()?;
        Ok(self)
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    pub fn early(&self) -> NaiveTime {
        self.early
    }

    pub fn late(&self) -> NaiveTime {
        self.late
    }

    pub fn target(&self) -> NaiveTime {
        self.target
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Check anchor ordering and precision bounds.
    pub fn validate(&self) -> Result<()> {
        if !(self.early < self.target && self.target < self.late) {
            return Err(NoonTempError::InvalidConfig(format!(
                "Anchors must satisfy early < target < late, got early={} target={} late={}",
                self.early.format("%H:%M"),
                self.target.format("%H:%M"),
                self.late.format("%H:%M")
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(NoonTempError::InvalidConfig(format!(
                "Precision {} exceeds maximum of {} decimal digits",
                self.precision, MAX_PRECISION
            )));
        }
        Ok(())
    }

    /// Which anchor slot, if any, a time of day fills.
    pub fn anchor_for(&self, time: NaiveTime) -> Option<Anchor> {
        if time == self.early {
            Some(Anchor::Early)
        } else if time == self.late {
            Some(Anchor::Late)
        } else if time == self.target {
            Some(Anchor::Target)
        } else {
            None
        }
    }
}

/// Fractional hours since midnight.
pub(crate) fn hours_of(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 3600.0
}

/// Anchor values collected for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorSet {
    pub date: NaiveDate,
    pub early: Option<f64>,
    pub late: Option<f64>,
    pub target: Option<f64>,
    /// Set when `target` was computed rather than observed.
    pub interpolated: bool,
}

impl AnchorSet {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            early: None,
            late: None,
            target: None,
            interpolated: false,
        }
    }

    /// Write a value into one slot. Later writes replace earlier ones.
    pub fn set(&mut self, anchor: Anchor, value: f64) {
        match anchor {
            Anchor::Early => self.early = Some(value),
            Anchor::Late => self.late = Some(value),
            Anchor::Target => self.target = Some(value),
        }
    }

    pub fn has_brackets(&self) -> bool {
        self.early.is_some() && self.late.is_some()
    }

    /// Anchor slots still empty, in early/late/target order.
    pub fn missing(&self) -> Vec<Anchor> {
        [
            (Anchor::Early, self.early),
            (Anchor::Late, self.late),
            (Anchor::Target, self.target),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(anchor, _)| anchor)
        .collect()
    }
}

/// One retained day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyEstimate {
    /// Calendar date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Exact or interpolated temperature at the target time.
    pub temperature: f64,
}

/// How a date's fate was decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayOutcome {
    /// Target observed directly.
    Exact,
    /// Target computed from the bracketing anchors.
    Interpolated,
    /// Dropped; lists the anchors that were never observed.
    Incomplete { missing: Vec<Anchor> },
}

impl std::fmt::Display for DayOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayOutcome::Exact => write!(f, "exact"),
            DayOutcome::Interpolated => write!(f, "interpolated"),
            DayOutcome::Incomplete { missing } => {
                let names: Vec<String> = missing.iter().map(Anchor::to_string).collect();
                write!(f, "incomplete (missing {})", names.join(", "))
            }
        }
    }
}

/// Per-date view of the engine's decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayResolution {
    pub date: NaiveDate,
    pub early: Option<f64>,
    pub late: Option<f64>,
    pub target: Option<f64>,
    #[serde(flatten)]
    pub outcome: DayOutcome,
}

impl DayResolution {
    /// The estimate this day emits, if it was retained.
    pub fn estimate(&self) -> Option<DailyEstimate> {
        match (&self.outcome, self.target) {
            (DayOutcome::Incomplete { .. }, _) | (_, None) => None,
            (_, Some(temperature)) => Some(DailyEstimate {
                date: self.date,
                temperature,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn default_config_matches_provider_cadence() {
        let config = AnchorConfig::default();
        assert_eq!(config.early(), hm(6, 0));
        assert_eq!(config.late(), hm(12, 0));
        assert_eq!(config.target(), hm(11, 0));
        assert_eq!(config.precision(), 1);
        assert_eq!(config.rounding(), Rounding::HalfAwayFromZero);
        assert_eq!(config.retention(), RetentionPolicy::Bracketed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_target_outside_brackets() {
        assert!(AnchorConfig::new(hm(6, 0), hm(12, 0), hm(13, 0)).is_err());
        assert!(AnchorConfig::new(hm(12, 0), hm(6, 0), hm(11, 0)).is_err());
        assert!(AnchorConfig::new(hm(6, 0), hm(12, 0), hm(6, 0)).is_err());
    }

    #[test]
    fn config_rejects_excessive_precision() {
        let result = AnchorConfig::default().with_precision(MAX_PRECISION + 1);
        assert!(matches!(result, Err(NoonTempError::InvalidConfig(_))));
        assert!(AnchorConfig::default().with_precision(400).is_err());
        assert!(AnchorConfig::default().with_precision(0).is_ok());
    }

    #[test]
    fn builder_chain_keeps_config_valid() {
        let config = AnchorConfig::new(hm(0, 0), hm(18, 0), hm(12, 0))
            .unwrap()
            .with_precision(MAX_PRECISION)
            .unwrap()
            .with_rounding(Rounding::HalfEven)
            .with_retention(RetentionPolicy::ExactOrBracketed);

        assert!(config.validate().is_ok());
        assert_eq!(config.precision(), MAX_PRECISION);
        assert_eq!(config.rounding(), Rounding::HalfEven);
        assert_eq!(config.retention(), RetentionPolicy::ExactOrBracketed);
    }

    #[test]
    fn anchor_for_maps_each_slot() {
        let config = AnchorConfig::default();
        assert_eq!(config.anchor_for(hm(6, 0)), Some(Anchor::Early));
        assert_eq!(config.anchor_for(hm(12, 0)), Some(Anchor::Late));
        assert_eq!(config.anchor_for(hm(11, 0)), Some(Anchor::Target));
        assert_eq!(config.anchor_for(hm(11, 30)), None);
        assert_eq!(config.anchor_for(hm(18, 0)), None);
    }

    #[test]
    fn hours_of_is_fractional() {
        assert_eq!(hours_of(hm(6, 0)), 6.0);
        assert_eq!(hours_of(hm(11, 30)), 11.5);
    }

    #[test]
    fn anchor_set_last_write_wins() {
        let mut set = AnchorSet::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        set.set(Anchor::Early, 1.0);
        set.set(Anchor::Early, 2.5);
        assert_eq!(set.early, Some(2.5));
        assert_eq!(set.missing(), vec![Anchor::Late, Anchor::Target]);
        assert!(!set.has_brackets());
    }

    #[test]
    fn retention_from_str() {
        assert_eq!(
            RetentionPolicy::from_str("bracketed").unwrap(),
            RetentionPolicy::Bracketed
        );
        assert_eq!(
            RetentionPolicy::from_str("EXACT_OR_BRACKETED").unwrap(),
            RetentionPolicy::ExactOrBracketed
        );
        assert!(RetentionPolicy::from_str("always").is_err());
    }

    #[test]
    fn daily_estimate_serialization() {
        let estimate = DailyEstimate {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            temperature: 3.7,
        };
        assert_eq!(
            serde_json::to_string(&estimate).unwrap(),
            r#"{"date":"2024-01-01","temperature":3.7}"#
        );
    }

    #[test]
    fn day_resolution_serializes_flat_outcome() {
        let resolution = DayResolution {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            early: Some(1.0),
            late: None,
            target: None,
            outcome: DayOutcome::Incomplete {
                missing: vec![Anchor::Late, Anchor::Target],
            },
        };
        assert_eq!(
            serde_json::to_string(&resolution).unwrap(),
            r#"{"date":"2024-01-02","early":1.0,"late":null,"target":null,"status":"incomplete","missing":["late","target"]}"#
        );
        assert_eq!(resolution.estimate(), None);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(DayOutcome::Exact.to_string(), "exact");
        assert_eq!(
            DayOutcome::Incomplete {
                missing: vec![Anchor::Early]
            }
            .to_string(),
            "incomplete (missing early)"
        );
    }
}
