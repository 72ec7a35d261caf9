//! Monthly reconciliation of actual versus due contributions

use super::model::{sum_by_month, Couple};
use super::Month;
use crate::allocation::{ContributionStrategy, StrategyConfig};
use crate::error::{AllocationError, LedgerError};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

/// Maximum allowed deviation of `credit1 + credit2` from zero
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Figures for one reconciled month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyMetrics {
    pub person1_earnings: f64,
    pub person2_earnings: f64,
    pub person1_costs: f64,
    pub person2_costs: f64,
    pub person1_percentage: f64,
    pub person2_percentage: f64,
    pub person1_due: f64,
    pub person2_due: f64,
    /// Cumulative credit of person1 at the end of the month
    pub person1_credit: f64,
    /// Cumulative credit of person2 at the end of the month
    pub person2_credit: f64,
    pub total_earnings: f64,
    pub total_costs: f64,
}

/// Month-ordered ledger output
pub type LedgerReport = BTreeMap<Month, MonthlyMetrics>;

/// Runs the ledger loop with a strategy fixed at construction
pub struct Reconciler {
    strategy: Box<dyn ContributionStrategy>,
}

impl Reconciler {
    pub fn new(strategy: Box<dyn ContributionStrategy>) -> Self {
        Self { strategy }
    }

    pub fn from_config(config: &StrategyConfig) -> Result<Self, AllocationError> {
        Ok(Self::new(config.build()?))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Reconcile every month with activity, oldest first
    ///
    /// Ledger state on the couple is rebuilt from zero. It is written back only
    /// when every month balances; on error the couple is left untouched.
    pub fn reconcile(&self, couple: &mut Couple) -> Result<LedgerReport, LedgerError> {
        let months = couple.months();
        info!(
            "Reconciling {} months for {} and {} with {}",
            months.len(),
            couple.person1.name,
            couple.person2.name,
            self.strategy.name()
        );

        let mut report = LedgerReport::new();
        let mut person1_cumulative = 0.0;
        let mut person2_cumulative = 0.0;
        let mut person1_history = BTreeMap::new();
        let mut person2_history = BTreeMap::new();

        for month in months {
            let person1_earnings = sum_by_month(&couple.person1.earnings, month);
            let person2_earnings = sum_by_month(&couple.person2.earnings, month);
            let person1_costs = sum_by_month(&couple.person1.costs, month);
            let person2_costs = sum_by_month(&couple.person2.costs, month);
            let total_costs = person1_costs + person2_costs;

            let due = self
                .strategy
                .calculate(person1_earnings, person2_earnings, total_costs)
                .map_err(|source| LedgerError::Allocation { month, source })?;

            // Each person actually contributed what they paid
            let person1_credit = person1_costs - due.person1_contribution + person1_cumulative;
            let person2_credit = person2_costs - due.person2_contribution + person2_cumulative;

            let balanced = person1_credit.is_finite()
                && person2_credit.is_finite()
                && (person1_credit + person2_credit).abs() <= BALANCE_TOLERANCE;
            if !balanced {
                return Err(LedgerError::Imbalance {
                    month,
                    person1_credit,
                    person2_credit,
                });
            }

            person1_cumulative = person1_credit;
            person2_cumulative = person2_credit;
            // months are distinct, so each key is written once
            person1_history.entry(month).or_insert(person1_credit);
            person2_history.entry(month).or_insert(person2_credit);

            debug!(
                "{month}: costs {total_costs:.2}, due {:.2}/{:.2}, credit {:.2}/{:.2}",
                due.person1_contribution, due.person2_contribution, person1_credit, person2_credit
            );

            report.insert(
                month,
                MonthlyMetrics {
                    person1_earnings,
                    person2_earnings,
                    person1_costs,
                    person2_costs,
                    person1_percentage: due.person1_percentage,
                    person2_percentage: due.person2_percentage,
                    person1_due: due.person1_contribution,
                    person2_due: due.person2_contribution,
                    person1_credit,
                    person2_credit,
                    total_earnings: person1_earnings + person2_earnings,
                    total_costs,
                },
            );
        }

        couple.person1.set_ledger(person1_cumulative, person1_history);
        couple.person2.set_ledger(person2_cumulative, person2_history);
        Ok(report)
    }
}
