//! Household model and the monthly credit ledger

mod month;
mod model;
mod reconcile;

pub use model::{sum_by_month, Cost, Couple, Dated, Earning, Person};
pub use month::Month;
pub use reconcile::{LedgerReport, MonthlyMetrics, Reconciler, BALANCE_TOLERANCE};
