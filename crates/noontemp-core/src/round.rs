//! Rounding policy for interpolated temperatures.
//!
//! Values are scaled by `10^digits`, rounded to an integer with the chosen
//! tie-breaking rule, and scaled back. `f64::round` breaks ties away from
//! zero, so `0.25` at one digit becomes `0.3` and `-0.25` becomes `-0.3`.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{NoonTempError, Result};

/// Tie-breaking rule applied when rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round half away from zero (`2.25 -> 2.3`, `-2.25 -> -2.3`).
    #[default]
    HalfAwayFromZero,
    /// Round half to even (`2.25 -> 2.2`, `2.35 -> 2.4`).
    HalfEven,
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rounding::HalfAwayFromZero => write!(f, "half_away_from_zero"),
            Rounding::HalfEven => write!(f, "half_even"),
        }
    }
}

impl FromStr for Rounding {
    type Err = NoonTempError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "half_away_from_zero" => Ok(Rounding::HalfAwayFromZero),
            "half_even" => Ok(Rounding::HalfEven),
            _ => Err(NoonTempError::ParseError(format!(
                "Unknown rounding mode: '{}'. Expected 'half_away_from_zero' or 'half_even'",
                s
            ))),
        }
    }
}

/// Round `value` to `digits` decimal places.
///
/// Values too large to scale are returned unchanged; at that magnitude they
/// carry no fractional digits anyway.
///
/// # Examples
///
/// ```
/// use noontemp_core::round::{Rounding, round_to};
///
/// assert_eq!(round_to(3.6666, 1, Rounding::HalfAwayFromZero), 3.7);
/// assert_eq!(round_to(-0.25, 1, Rounding::HalfAwayFromZero), -0.3);
/// ```
pub fn round_to(value: f64, digits: u32, rounding: Rounding) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = match rounding {
        Rounding::HalfAwayFromZero => scaled.round(),
        Rounding::HalfEven => scaled.round_ties_even(),
    };
    let result = rounded / scale;
    // Normalise -0.0 so it serializes as 0.0.
    if result == 0.0 { 0.0 } else { result }
}
