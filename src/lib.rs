//! Earnings-proportional cost sharing for two-person households
//!
//! Monthly shared costs are split by a fairness curve of the two incomes,
//! either in one pass or across progressive cost bands, and the difference
//! between what each person paid and what they were due accumulates into a
//! running credit ledger.

pub mod allocation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod records;
pub mod report;

pub use allocation::{ContributionStrategy, Contributions, StrategyConfig, StrategyKind};
pub use config::RunConfig;
pub use error::{AllocationError, LedgerError, RecordError};
pub use ledger::{Couple, LedgerReport, Month, MonthlyMetrics, Person, Reconciler};
pub use records::{load_records, RecordStore};
