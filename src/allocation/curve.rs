//! Fairness curve mapping an earnings ratio to a percentage split
//!
//! The base shape is `f(x) = 50 + (100/π)·atan((x − 1)/s)` for an earnings
//! multiplier `x ≥ 1`, rising from 50 toward 100. For `0 < x < 1` the curve is
//! mirrored, `g(x) = 100 − f(1/x)`, so swapping the earners yields the
//! complementary split.

use crate::error::AllocationError;
use std::f64::consts::PI;

/// Maximum allowed deviation of `p1 + p2` from 100
pub const PERCENTAGE_TOLERANCE: f64 = 0.01;

/// Base curve for a multiplier `x ≥ 1`
fn base_curve(x: f64, sensitivity: f64) -> f64 {
    50.0 + (100.0 / PI) * ((x - 1.0) / sensitivity).atan()
}

/// Share of the person whose earnings are `x` times the other's
///
/// Defined for `x > 0`; an infinite multiplier saturates at 100.
pub fn share_for_multiplier(x: f64, sensitivity: f64) -> f64 {
    if x >= 1.0 {
        base_curve(x, sensitivity)
    } else {
        100.0 - base_curve(1.0 / x, sensitivity)
    }
}

fn validate_earning(amount: f64) -> Result<f64, AllocationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(AllocationError::InvalidEarnings(amount))
    }
}

pub(crate) fn validate_sensitivity(sensitivity: f64) -> Result<f64, AllocationError> {
    if sensitivity.is_finite() && sensitivity > 0.0 {
        Ok(sensitivity)
    } else {
        Err(AllocationError::InvalidSensitivity(sensitivity))
    }
}

/// Split 100% between two earners
///
/// Returns `(percent_a, percent_b)`. Equal earnings (including both zero)
/// split 50/50; a sole earner saturates at 100/0.
pub fn split(
    earning_a: f64,
    earning_b: f64,
    sensitivity: f64,
) -> Result<(f64, f64), AllocationError> {
    let earning_a = validate_earning(earning_a)?;
    let earning_b = validate_earning(earning_b)?;
    let sensitivity = validate_sensitivity(sensitivity)?;

    if earning_a == earning_b {
        return Ok((50.0, 50.0));
    }

    let a_is_higher = earning_a > earning_b;
    let (higher, lower) = if a_is_higher {
        (earning_a, earning_b)
    } else {
        (earning_b, earning_a)
    };

    let higher_share = if lower == 0.0 {
        100.0
    } else {
        share_for_multiplier(higher / lower, sensitivity)
    };

    let (percent_a, percent_b) = if a_is_higher {
        (higher_share, 100.0 - higher_share)
    } else {
        (100.0 - higher_share, higher_share)
    };

    if (percent_a + percent_b - 100.0).abs() > PERCENTAGE_TOLERANCE {
        return Err(AllocationError::CurveInconsistency {
            person1: percent_a,
            person2: percent_b,
        });
    }

    Ok((percent_a, percent_b))
}
