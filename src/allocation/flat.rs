//! Flat-curve strategy: one fairness curve applied to the whole cost

use super::{curve, ContributionStrategy, Contributions};
use crate::error::AllocationError;

/// Default sensitivity of the flat fairness curve
pub const DEFAULT_FLAT_SENSITIVITY: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurveStrategy {
    sensitivity: f64,
}

impl FlatCurveStrategy {
    pub fn new(sensitivity: f64) -> Result<Self, AllocationError> {
        let sensitivity = curve::validate_sensitivity(sensitivity)?;
        Ok(Self { sensitivity })
    }
}

impl Default for FlatCurveStrategy {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_FLAT_SENSITIVITY,
        }
    }
}

impl ContributionStrategy for FlatCurveStrategy {
    fn calculate(
        &self,
        person1_earnings: f64,
        person2_earnings: f64,
        total_costs: f64,
    ) -> Result<Contributions, AllocationError> {
        let (person1_percentage, person2_percentage) =
            curve::split(person1_earnings, person2_earnings, self.sensitivity)?;

        Ok(Contributions {
            person1_percentage,
            person2_percentage,
            person1_contribution: total_costs * (person1_percentage / 100.0),
            person2_contribution: total_costs * (person2_percentage / 100.0),
        })
    }

    fn name(&self) -> &'static str {
        "flat-curve"
    }
}
