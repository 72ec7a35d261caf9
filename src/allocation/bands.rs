//! Progressive-band strategy
//!
//! The total cost is cut into consecutive slices by magnitude, e.g.
//! `[0,300]`, `(300,1300]`, `(1300,3300]`, `(3300,∞)`. Each slice is split on
//! its own, either at a fixed percentage or with the fairness curve at a
//! band-specific sensitivity, and the per-band shares are summed.

use super::{curve, ContributionStrategy, Contributions};
use crate::error::AllocationError;
use log::trace;

/// One cost band
///
/// Exactly one of `sensitivity` and `fixed_percentage` must be set.
/// `fixed_percentage` is the share of person1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub upper_limit: f64,
    pub sensitivity: Option<f64>,
    pub fixed_percentage: Option<f64>,
}

impl Band {
    pub fn fixed(upper_limit: f64, percentage: f64) -> Self {
        Self {
            upper_limit,
            sensitivity: None,
            fixed_percentage: Some(percentage),
        }
    }

    pub fn curve(upper_limit: f64, sensitivity: f64) -> Self {
        Self {
            upper_limit,
            sensitivity: Some(sensitivity),
            fixed_percentage: None,
        }
    }
}

/// Household bands: small costs split evenly, larger slices increasingly by earnings
pub fn default_bands() -> Vec<Band> {
    vec![
        Band::fixed(300.0, 50.0),
        Band::curve(1300.0, 1.2),
        Band::curve(3300.0, 0.8),
        Band::curve(f64::INFINITY, 0.6),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SplitRule {
    Fixed(f64),
    Curve(f64),
}

fn invalid(index: usize, reason: impl Into<String>) -> AllocationError {
    AllocationError::InvalidBand {
        index,
        reason: reason.into(),
    }
}

/// Resolve the split rule of a band, rejecting incomplete or conflicting bands
fn split_rule(index: usize, band: &Band) -> Result<SplitRule, AllocationError> {
    match (band.sensitivity, band.fixed_percentage) {
        (Some(sensitivity), None) => curve::validate_sensitivity(sensitivity)
            .map(SplitRule::Curve)
            .map_err(|e| invalid(index, e.to_string())),
        (None, Some(percentage)) if (0.0..=100.0).contains(&percentage) => {
            Ok(SplitRule::Fixed(percentage))
        }
        (None, Some(percentage)) => Err(invalid(
            index,
            format!("fixed percentage {percentage} is outside 0..=100"),
        )),
        (Some(_), Some(_)) => Err(invalid(index, "both sensitivity and fixed percentage are set")),
        (None, None) => Err(invalid(index, "neither sensitivity nor fixed percentage is set")),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandedStrategy {
    bands: Vec<Band>,
}

impl BandedStrategy {
    /// Validate and build a band ladder
    pub fn new(bands: Vec<Band>) -> Result<Self, AllocationError> {
        if bands.is_empty() {
            return Err(invalid(0, "at least one band is required"));
        }

        let mut previous_limit = 0.0;
        for (index, band) in bands.iter().enumerate() {
            split_rule(index, band)?;
            if band.upper_limit.is_nan() || band.upper_limit <= previous_limit {
                return Err(invalid(
                    index,
                    format!(
                        "upper limit {} must exceed previous limit {previous_limit}",
                        band.upper_limit
                    ),
                ));
            }
            previous_limit = band.upper_limit;
        }

        if previous_limit != f64::INFINITY {
            return Err(invalid(bands.len() - 1, "last band must be unbounded"));
        }

        Ok(Self { bands })
    }
}

impl Default for BandedStrategy {
    fn default() -> Self {
        Self {
            bands: default_bands(),
        }
    }
}

impl ContributionStrategy for BandedStrategy {
    fn calculate(
        &self,
        person1_earnings: f64,
        person2_earnings: f64,
        total_costs: f64,
    ) -> Result<Contributions, AllocationError> {
        let mut remaining = total_costs;
        let mut previous_limit = 0.0;
        let mut person1_contribution = 0.0;
        let mut person2_contribution = 0.0;

        for (index, band) in self.bands.iter().enumerate() {
            let band_amount = (band.upper_limit - previous_limit).min(remaining);
            if band_amount <= 0.0 {
                previous_limit = band.upper_limit;
                continue;
            }

            let (p1_percentage, p2_percentage) = match split_rule(index, band)? {
                SplitRule::Fixed(percentage) => (percentage, 100.0 - percentage),
                SplitRule::Curve(sensitivity) => {
                    curve::split(person1_earnings, person2_earnings, sensitivity)?
                }
            };
            trace!(
                "band ({previous_limit}, {}]: {band_amount:.2} split {:.2}/{:.2}",
                band.upper_limit,
                p1_percentage,
                p2_percentage
            );

            person1_contribution += band_amount * (p1_percentage / 100.0);
            person2_contribution += band_amount * (p2_percentage / 100.0);

            remaining -= band_amount;
            previous_limit = band.upper_limit;
            if remaining <= 0.0 {
                break;
            }
        }

        // Blended rate across the traversed bands, not a single curve output
        let total_contribution = person1_contribution + person2_contribution;
        let (person1_percentage, person2_percentage) = if total_contribution == 0.0 {
            (0.0, 0.0)
        } else {
            (
                person1_contribution / total_contribution * 100.0,
                person2_contribution / total_contribution * 100.0,
            )
        };

        Ok(Contributions {
            person1_percentage,
            person2_percentage,
            person1_contribution,
            person2_contribution,
        })
    }

    fn name(&self) -> &'static str {
        "progressive-bands"
    }
}
