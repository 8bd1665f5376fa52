//! Pipeline entry points.
//!
//! Chains the stages leaves first: bucket the observations, interpolate
//! missing targets, then assemble the retained days. Every call owns its
//! working data, so concurrent callers need no coordination.

use serde::Serialize;
use tracing::debug;

use crate::assemble::{assemble, resolve_days};
use crate::bucket::{BucketStats, DailyBuckets, bucket_observations};
use crate::interpolate::fill_missing_targets;
use crate::models::{AnchorConfig, DailyEstimate, DayOutcome, DayResolution, Observation};

/// Estimates together with the counters gathered on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub estimates: Vec<DailyEstimate>,
    pub stats: BucketStats,
    /// Dates seen in the input, retained or not.
    pub days_seen: usize,
    /// Retained dates whose value was interpolated.
    pub interpolated: usize,
}

fn prepare(observations: &[Observation], config: &AnchorConfig) -> DailyBuckets {
    let mut buckets = bucket_observations(observations, config);
    fill_missing_targets(&mut buckets, config);
    buckets
}

/// Produce one estimate per retained day, in first-appearance date order.
///
/// Never fails: malformed observations are skipped and incomplete days are
/// dropped, so bad input only means fewer estimates.
///
/// # Examples
///
/// ```
/// use noontemp_core::compute::estimate_daily;
/// use noontemp_core::models::{AnchorConfig, Observation};
///
/// let observations = vec![
///     Observation::new("2024-01-01T06:00:00Z", -3.0),
///     Observation::new("2024-01-01T12:00:00Z", 5.0),
/// ];
/// let estimates = estimate_daily(&observations, &AnchorConfig::default());
///
/// assert_eq!(estimates.len(), 1);
/// assert_eq!(estimates[0].temperature, 3.7);
/// ```
pub fn estimate_daily(observations: &[Observation], config: &AnchorConfig) -> Vec<DailyEstimate> {
    let buckets = prepare(observations, config);
    assemble(&buckets, config.retention())
}

/// Like [`estimate_daily`], also returning bucketing statistics.
pub fn estimate_daily_report(observations: &[Observation], config: &AnchorConfig) -> EstimateReport {
    let buckets = prepare(observations, config);
    let resolutions = resolve_days(&buckets, config.retention());

    let estimates: Vec<DailyEstimate> = resolutions
        .iter()
        .filter_map(DayResolution::estimate)
        .collect();
    let interpolated = resolutions
        .iter()
        .filter(|day| day.outcome == DayOutcome::Interpolated)
        .count();

    debug!(
        days_seen = buckets.len(),
        retained = estimates.len(),
        interpolated,
        "Assembled daily estimates"
    );

    EstimateReport {
        estimates,
        stats: buckets.stats(),
        days_seen: buckets.len(),
        interpolated,
    }
}

/// Resolve every date seen in the input, including the dropped ones.
pub fn explain_days(observations: &[Observation], config: &AnchorConfig) -> Vec<DayResolution> {
    let buckets = prepare(observations, config);
    resolve_days(&buckets, config.retention())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RetentionPolicy;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn full_day(day: &str, early: f64, late: f64) -> Vec<Observation> {
        vec![
            Observation::new(format!("{day}T00:00:00Z"), early - 2.0),
            Observation::new(format!("{day}T06:00:00Z"), early),
            Observation::new(format!("{day}T12:00:00Z"), late),
            Observation::new(format!("{day}T18:00:00Z"), late - 1.0),
        ]
    }

    #[test]
    fn exact_match_takes_priority() {
        let observations = vec![
            Observation::new("2024-01-01T06:00:00Z", -3.0),
            Observation::new("2024-01-01T11:00:00Z", 2.0),
            Observation::new("2024-01-01T12:00:00Z", 5.0),
        ];
        let estimates = estimate_daily(&observations, &AnchorConfig::default());

        assert_eq!(
            estimates,
            vec![DailyEstimate {
                date: date(2024, 1, 1),
                temperature: 2.0
            }]
        );
    }

    #[test]
    fn interpolates_without_exact_reading() {
        let observations = vec![
            Observation::new("2024-01-01T06:00:00Z", -3.0),
            Observation::new("2024-01-01T12:00:00Z", 5.0),
        ];
        let estimates = estimate_daily(&observations, &AnchorConfig::default());

        assert_eq!(estimates.len(), 1);
        assert_eq!(estimates[0].temperature, 3.7);
    }

    #[test]
    fn drops_day_with_only_early_anchor() {
        let observations = vec![Observation::new("2024-01-01T06:00:00Z", -3.0)];
        assert!(estimate_daily(&observations, &AnchorConfig::default()).is_empty());
    }

    #[test]
    fn drops_exact_day_without_brackets_by_default() {
        let observations = vec![
            Observation::new("2024-01-01T11:00:00Z", 2.0),
            Observation::new("2024-01-01T12:00:00Z", 5.0),
        ];
        let config = AnchorConfig::default();
        assert!(estimate_daily(&observations, &config).is_empty());

        let lenient = config.with_retention(RetentionPolicy::ExactOrBracketed);
        assert_eq!(
            estimate_daily(&observations, &lenient),
            vec![DailyEstimate {
                date: date(2024, 1, 1),
                temperature: 2.0
            }]
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(estimate_daily(&[], &AnchorConfig::default()).is_empty());
        let report = estimate_daily_report(&[], &AnchorConfig::default());
        assert!(report.estimates.is_empty());
        assert_eq!(report.days_seen, 0);
    }

    #[test]
    fn preserves_chronological_order() {
        let mut observations = Vec::new();
        observations.extend(full_day("2024-01-01", 1.0, 7.0));
        observations.extend(full_day("2024-01-02", 2.0, 8.0));
        observations.extend(full_day("2024-01-03", 3.0, 9.0));

        let estimates = estimate_daily(&observations, &AnchorConfig::default());
        let dates: Vec<NaiveDate> = estimates.iter().map(|e| e.date).collect();

        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]
        );
        // 1 + 5 * 6 / 6 = 6.0
        assert_eq!(estimates[0].temperature, 6.0);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut observations = full_day("2024-01-01", -3.0, 5.0);
        observations.push(Observation::new("bad", 0.0));
        observations.push(Observation::new("2024-01-02T06:00:00Z", 1.0));
        let config = AnchorConfig::default();

        let first = estimate_daily(&observations, &config);
        let second = estimate_daily(&observations, &config);
        assert_eq!(first, second);
        assert_eq!(
            estimate_daily_report(&observations, &config),
            estimate_daily_report(&observations, &config)
        );
    }

    #[test]
    fn malformed_observations_only_reduce_output() {
        let observations = vec![
            Observation::new("2024-01-01T06:00:00Z", -3.0),
            Observation::new("2024-01-01", 99.0),
            Observation::new("2024-13-01T11:00:00Z", 99.0),
            Observation::new("2024-01-01T12:00:00Z", 5.0),
        ];
        let report = estimate_daily_report(&observations, &AnchorConfig::default());

        assert_eq!(report.stats.malformed, 2);
        assert_eq!(report.interpolated, 1);
        assert_eq!(report.estimates[0].temperature, 3.7);
    }

    #[test]
    fn explain_reports_dropped_days() {
        let observations = vec![
            Observation::new("2024-01-01T06:00:00Z", -3.0),
            Observation::new("2024-01-01T12:00:00Z", 5.0),
            Observation::new("2024-01-02T11:00:00Z", 2.0),
        ];
        let days = explain_days(&observations, &AnchorConfig::default());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].outcome, DayOutcome::Interpolated);
        assert_eq!(days[0].target, Some(3.7));
        assert!(matches!(days[1].outcome, DayOutcome::Incomplete { .. }));
        assert_eq!(days[1].estimate(), None);
    }

    #[test]
    fn extreme_readings_serialize_as_numbers() {
        let observations = vec![
            Observation::new("2024-01-01T06:00:00Z", -1.7e308),
            Observation::new("2024-01-01T12:00:00Z", 1.7e308),
            Observation::new("2024-01-02T06:00:00Z", 1.0e308),
            Observation::new("2024-01-02T12:00:00Z", 1.0e308),
        ];
        let estimates = estimate_daily(&observations, &AnchorConfig::default());

        assert_eq!(estimates.len(), 2);
        assert!(estimates.iter().all(|e| e.temperature.is_finite()));
        assert_eq!(estimates[1].temperature, 1.0e308);

        let json = serde_json::to_value(&estimates).unwrap();
        assert!(json[0]["temperature"].is_f64());
        assert!(json[1]["temperature"].is_f64());
    }
}
