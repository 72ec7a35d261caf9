//! Contribution allocation: fairness curve and splitting strategies

pub mod curve;
mod flat;
mod bands;

pub use bands::{default_bands, Band, BandedStrategy};
pub use curve::{split, PERCENTAGE_TOLERANCE};
pub use flat::{FlatCurveStrategy, DEFAULT_FLAT_SENSITIVITY};

use crate::error::AllocationError;
use serde::{Deserialize, Serialize};

/// Due percentages and amounts for one month's costs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Contributions {
    pub person1_percentage: f64,
    pub person2_percentage: f64,
    pub person1_contribution: f64,
    pub person2_contribution: f64,
}

/// A rule deciding how much of `total_costs` each earner should pay
///
/// Implementations are pure: same inputs, same output, no side effects.
/// The two contributions must sum to `total_costs`.
pub trait ContributionStrategy {
    fn calculate(
        &self,
        person1_earnings: f64,
        person2_earnings: f64,
        total_costs: f64,
    ) -> Result<Contributions, AllocationError>;

    /// Short label used in logs and reports
    fn name(&self) -> &'static str;
}

/// Which strategy the ledger should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Single fairness curve over the whole monthly cost
    Flat,
    /// Progressive cost bands with per-band split rules
    #[default]
    Bands,
}

/// Strategy selection passed to the reconciler at construction time
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyConfig {
    FlatCurve { sensitivity: f64 },
    ProgressiveBands { bands: Vec<Band> },
}

impl StrategyConfig {
    /// Configuration for a strategy kind, using the compiled-in bands
    pub fn from_kind(kind: StrategyKind, flat_sensitivity: f64) -> Self {
        match kind {
            StrategyKind::Flat => StrategyConfig::FlatCurve {
                sensitivity: flat_sensitivity,
            },
            StrategyKind::Bands => StrategyConfig::ProgressiveBands {
                bands: default_bands(),
            },
        }
    }

    /// Validate the configuration and build the strategy
    pub fn build(&self) -> Result<Box<dyn ContributionStrategy>, AllocationError> {
        let strategy: Box<dyn ContributionStrategy> = match self {
            StrategyConfig::FlatCurve { sensitivity } => {
                Box::new(FlatCurveStrategy::new(*sensitivity)?)
            }
            StrategyConfig::ProgressiveBands { bands } => {
                Box::new(BandedStrategy::new(bands.clone())?)
            }
        };
        Ok(strategy)
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::from_kind(StrategyKind::default(), DEFAULT_FLAT_SENSITIVITY)
    }
}
