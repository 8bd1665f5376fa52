//! Final assembly of daily estimates.
//!
//! Each date ends in exactly one terminal state: complete (exact or
//! interpolated) or incomplete. Only complete dates are emitted, in the
//! order the bucketer first saw them.

use crate::bucket::DailyBuckets;
use crate::models::{AnchorSet, DailyEstimate, DayOutcome, DayResolution, RetentionPolicy};

/// Decide the terminal state of one anchor set.
///
/// Expects interpolation to have run already; a set with brackets but no
/// target is reported as incomplete.
pub fn resolve_day(set: &AnchorSet, retention: RetentionPolicy) -> DayOutcome {
    let retained = match retention {
        RetentionPolicy::Bracketed => set.has_brackets(),
        RetentionPolicy::ExactOrBracketed => {
            set.has_brackets() || (set.target.is_some() && !set.interpolated)
        }
    };

    match set.target {
        Some(_) if retained && set.interpolated => DayOutcome::Interpolated,
        Some(_) if retained => DayOutcome::Exact,
        _ => DayOutcome::Incomplete {
            missing: set.missing(),
        },
    }
}

/// Resolve every date, kept or not, in first-appearance order.
pub fn resolve_days(buckets: &DailyBuckets, retention: RetentionPolicy) -> Vec<DayResolution> {
    buckets
        .iter()
        .map(|set| DayResolution {
            date: set.date,
            early: set.early,
            late: set.late,
            target: set.target,
            outcome: resolve_day(set, retention),
        })
        .collect()
}

/// Emit one estimate per retained date.
pub fn assemble(buckets: &DailyBuckets, retention: RetentionPolicy) -> Vec<DailyEstimate> {
    resolve_days(buckets, retention)
        .iter()
        .filter_map(DayResolution::estimate)
        .collect()
}
