//! Error types for allocation, reconciliation, and record ingestion

use crate::ledger::Month;
use thiserror::Error;

/// Failures raised while splitting a cost between the two earners
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    #[error("percentages do not sum to 100: {person1:.4} + {person2:.4}")]
    CurveInconsistency { person1: f64, person2: f64 },

    #[error("sensitivity must be finite and positive, got {0}")]
    InvalidSensitivity(f64),

    #[error("earnings must be finite and non-negative, got {0}")]
    InvalidEarnings(f64),

    #[error("invalid band configuration at band {index}: {reason}")]
    InvalidBand { index: usize, reason: String },
}

/// Failures raised by the monthly reconciliation loop
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("exactly two persons are required, found {found}")]
    InputCardinality { found: usize },

    #[error(
        "credit and debt do not balance for month {month}: \
         {person1_credit:.4} + {person2_credit:.4}"
    )]
    Imbalance {
        month: Month,
        person1_credit: f64,
        person2_credit: f64,
    },

    #[error("allocation failed for month {month}: {source}")]
    Allocation {
        month: Month,
        #[source]
        source: AllocationError,
    },
}

/// Failures raised while reading earning and expense files
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{file} has no data rows")]
    Empty { file: &'static str },

    #[error("invalid date {value:?} in {file} at line {line}")]
    InvalidDate {
        file: &'static str,
        line: u64,
        value: String,
    },

    #[error("invalid amount {value:?} in {file} at line {line}")]
    InvalidAmount {
        file: &'static str,
        line: u64,
        value: String,
    },
}
