//! Two-point linear interpolation of the target-time value.
//!
//! For anchor times `e < t < l` (in fractional hours) and values observed
//! at `e` and `l`, the target value is
//!
//! ```text
//! target = early + ((t - e) * (late - early)) / (l - e)
//! ```
//!
//! rounded with the configured [`Rounding`](crate::round::Rounding) and
//! precision. With the default anchors this is `early + 5 * (late - early) / 6`.
//! Readings near the `f64` limits fall back to the convex form
//! `early * (1 - w) + late * w` with `w = (t - e) / (l - e)`, which cannot
//! overflow for finite inputs.

use tracing::{debug, warn};

use crate::bucket::DailyBuckets;
use crate::models::{AnchorConfig, hours_of};
use crate::round::round_to;

/// Interpolate the target value between the early and late anchor readings.
///
/// # Examples
///
/// ```
/// use noontemp_core::interpolate::interpolate_target;
/// use noontemp_core::models::AnchorConfig;
///
/// let value = interpolate_target(-3.0, 5.0, &AnchorConfig::default());
/// assert_eq!(value, 3.7);
/// ```
pub fn interpolate_target(early: f64, late: f64, config: &AnchorConfig) -> f64 {
    let e = hours_of(config.early());
    let t = hours_of(config.target());
    let l = hours_of(config.late());

    let mut raw = early + ((t - e) * (late - early)) / (l - e);
    if !raw.is_finite() {
        let w = (t - e) / (l - e);
        raw = early * (1.0 - w) + late * w;
    }
    round_to(raw, config.precision(), config.rounding())
}

/// Fill every missing target that has both bracketing anchors.
///
/// Observed targets are never overwritten. Days lacking an anchor are left
/// as they are; the assembler decides their fate. Returns the number of
/// days that were interpolated.
pub fn fill_missing_targets(buckets: &mut DailyBuckets, config: &AnchorConfig) -> usize {
    let mut filled = 0;

    for set in buckets.iter_mut() {
        if set.target.is_some() {
            continue;
        }
        if let (Some(early), Some(late)) = (set.early, set.late) {
            let value = interpolate_target(early, late, config);
            if !value.is_finite() {
                warn!(date = %set.date, early, late, "Interpolation produced a non-finite value");
                continue;
            }
            set.target = Some(value);
            set.interpolated = true;
            filled += 1;
        }
    }

    debug!(filled, "Interpolated missing target values");
    filled
}
