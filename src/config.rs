//! Run configuration
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or none at all) is valid. Band definitions are compiled in and are
//! not part of the configuration.

use crate::allocation::{StrategyConfig, StrategyKind, DEFAULT_FLAT_SENSITIVITY};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// CSV with `date,name,amount` rows
    #[serde(default = "default_earnings_path")]
    pub earnings_path: PathBuf,

    /// CSV with `date,amount,currency,payer,description` rows
    #[serde(default = "default_expenses_path")]
    pub expenses_path: PathBuf,

    /// `flat` or `bands`
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Sensitivity of the flat fairness curve (lower = steeper)
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,

    /// Directory receiving `ledger.csv` and `ledger.json`
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_earnings_path() -> PathBuf { PathBuf::from("data/earnings.csv") }
fn default_expenses_path() -> PathBuf { PathBuf::from("data/expenses.csv") }
fn default_sensitivity() -> f64 { DEFAULT_FLAT_SENSITIVITY }
fn default_output_dir() -> PathBuf { PathBuf::from("outputs") }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            earnings_path: default_earnings_path(),
            expenses_path: default_expenses_path(),
            strategy: StrategyKind::default(),
            sensitivity: DEFAULT_FLAT_SENSITIVITY,
            output_dir: default_output_dir(),
        }
    }
}

impl RunConfig {
    /// Read a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn strategy_config(&self) -> StrategyConfig {
        StrategyConfig::from_kind(self.strategy, self.sensitivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "strategy": "flat", "sensitivity": 0.9 }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.strategy, StrategyKind::Flat);
        assert_eq!(config.sensitivity, 0.9);
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.strategy_config(), StrategyConfig::FlatCurve { sensitivity: 0.9 });
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: RunConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RunConfig::default());
        assert!(matches!(config.strategy_config(), StrategyConfig::ProgressiveBands { .. }));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(serde_json::from_str::<RunConfig>(r#"{ "strategy": "communism" }"#).is_err());
    }
}
