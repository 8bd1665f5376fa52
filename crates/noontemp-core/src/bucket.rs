//! Daily bucketing of raw observations.
//!
//! Observations are grouped by calendar date. Only readings whose time of
//! day equals one of the configured anchors are kept; everything else is
//! counted and dropped. Dates keep the order in which they first appear in
//! the input, which for the provider feed is chronological.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{AnchorConfig, AnchorSet, Observation};
use crate::parse::decompose_timestamp;

/// Counters collected while bucketing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketStats {
    /// Observations consumed.
    pub observations: usize,
    /// Skipped because the timestamp could not be decomposed.
    pub malformed: usize,
    /// Skipped because the temperature was NaN or infinite.
    pub non_finite: usize,
    /// Ignored because the time of day matched no anchor.
    pub off_anchor: usize,
}

impl BucketStats {
    /// Observations that landed in an anchor slot.
    pub fn accepted(&self) -> usize {
        self.observations - self.malformed - self.non_finite - self.off_anchor
    }
}

/// Anchor sets keyed by date, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyBuckets {
    days: Vec<AnchorSet>,
    index: HashMap<NaiveDate, usize>,
    stats: BucketStats,
}

impl DailyBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the set for `date`, creating it at the end if absent.
    pub fn entry(&mut self, date: NaiveDate) -> &mut AnchorSet {
        let next = self.days.len();
        let position = *self.index.entry(date).or_insert(next);
        if position == next {
            self.days.push(AnchorSet::new(date));
        }
        &mut self.days[position]
    }

    pub fn get(&self, date: NaiveDate) -> Option<&AnchorSet> {
        self.index.get(&date).map(|&position| &self.days[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnchorSet> {
        self.days.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AnchorSet> {
        self.days.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn stats(&self) -> BucketStats {
        self.stats
    }
}

/// Group observations by date and fill the anchor slots.
///
/// Malformed observations are logged and skipped; they never abort the run.
/// When two observations target the same slot, the later one wins.
///
/// # Examples
///
/// ```
/// use noontemp_core::bucket::bucket_observations;
/// use noontemp_core::models::{AnchorConfig, Observation};
///
/// let observations = vec![
///     Observation::new("2024-01-01T06:00:00Z", -3.0),
///     Observation::new("2024-01-01T09:00:00Z", 0.5),
///     Observation::new("2024-01-01T12:00:00Z", 5.0),
/// ];
/// let buckets = bucket_observations(&observations, &AnchorConfig::default());
///
/// assert_eq!(buckets.len(), 1);
/// assert_eq!(buckets.stats().off_anchor, 1);
/// ```
pub fn bucket_observations(observations: &[Observation], config: &AnchorConfig) -> DailyBuckets {
    let mut buckets = DailyBuckets::new();

    for observation in observations {
        buckets.stats.observations += 1;

        let parts = match decompose_timestamp(&observation.timestamp) {
            Ok(parts) => parts,
            Err(e) => {
                warn!(timestamp = %observation.timestamp, "Skipping observation: {}", e);
                buckets.stats.malformed += 1;
                continue;
            }
        };

        if !observation.temperature.is_finite() {
            warn!(
                timestamp = %observation.timestamp,
                temperature = observation.temperature,
                "Skipping observation with non-finite temperature"
            );
            buckets.stats.non_finite += 1;
            continue;
        }

        match config.anchor_for(parts.time) {
            Some(anchor) => buckets.entry(parts.date).set(anchor, observation.temperature),
            None => buckets.stats.off_anchor += 1,
        }
    }

    debug!(
        days = buckets.len(),
        observations = buckets.stats.observations,
        malformed = buckets.stats.malformed,
        non_finite = buckets.stats.non_finite,
        off_anchor = buckets.stats.off_anchor,
        "Bucketed observations"
    );

    buckets
}
