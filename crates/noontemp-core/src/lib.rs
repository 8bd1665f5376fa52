//! # noontemp-core
//!
//! Daily target-time temperature resampling for irregular forecast feeds.
//!
//! Given an unevenly sampled series of temperature readings keyed by
//! ISO-8601 timestamps, this library produces one estimate per calendar day
//! at a fixed target time of day. An exact reading at the target time is
//! used when present; otherwise the value is interpolated linearly between
//! an early and a late anchor reading. Days lacking either anchor are dropped.
//!
//! ## Features
//!
//! - **Pure Engine**: No I/O or shared state; bad input yields fewer
//!   estimates, never an error or a panic.
//! - **Configurable Anchors**: Early, late and target times default to
//!   `06:00`, `12:00` and `11:00`, matching a 6-hour provider cadence.
//! - **Rounding Policy**: Interpolated values are rounded to a fixed number of
//!   decimal digits, half away from zero or half to even.
//! - **Typed Feed Boundary**: MET Norway `locationforecast` documents and
//!   newline-delimited observation streams, validated record by record.
//!
//! ## Example
//!
//! ```rust
//! use noontemp_core::prelude::*;
//!
//! let observations = vec![
//!     Observation::new("2024-01-01T06:00:00Z", -3.0),
//!     Observation::new("2024-01-01T12:00:00Z", 5.0),
//!     Observation::new("2024-01-02T06:00:00Z", 1.0),
//! ];
//!
//! let estimates = estimate_daily(&observations, &AnchorConfig::default());
//!
//! assert_eq!(estimates.len(), 1);
//! println!("{}: {}", estimates[0].date, estimates[0].temperature);
//! ```

pub mod assemble;
pub mod bucket;
pub mod compute;
pub mod error;
pub mod feed;
pub mod interpolate;
pub mod models;
pub mod parse;
pub mod round;

// Re-export commonly used types at the crate root
pub use compute::{EstimateReport, estimate_daily, estimate_daily_report, explain_days};
pub use error::{NoonTempError, Result};
pub use feed::{FeedStats, Forecast, parse_observation_stream};
pub use models::{
    Anchor, AnchorConfig, AnchorSet, DailyEstimate, DayOutcome, DayResolution, Observation,
    RetentionPolicy,
};
pub use parse::{TimestampParts, decompose_timestamp, parse_anchor_time};
pub use round::{Rounding, round_to};

/// Prelude module for convenient imports.
///
/// ```
/// use noontemp_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bucket::{BucketStats, DailyBuckets, bucket_observations};
    pub use crate::compute::{EstimateReport, estimate_daily, estimate_daily_report, explain_days};
    pub use crate::error::{NoonTempError, Result};
    pub use crate::feed::{FeedStats, Forecast, parse_observation_stream};
    pub use crate::models::*;
    pub use crate::parse::{decompose_timestamp, parse_anchor_time};
    pub use crate::round::{Rounding, round_to};
}
