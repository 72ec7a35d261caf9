//! Household data structures: dated records, persons and the couple

use super::Month;
use crate::error::LedgerError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// A record carrying a date and a monetary amount
pub trait Dated {
    fn date(&self) -> NaiveDate;
    fn amount(&self) -> f64;
}

/// Income received by one person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Earning {
    pub date: NaiveDate,
    pub amount: f64,
}

/// A shared household expense paid by one person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cost {
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    pub payer: String,
    pub description: String,
}

impl Dated for Earning {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Cost {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Sum the amounts of all records dated within `month`
pub fn sum_by_month<T: Dated>(records: &[T], month: Month) -> f64 {
    records
        .iter()
        .filter(|r| month.contains(r.date()))
        .fold(0.0, |total, r| total + r.amount())
}

/// One participant of the household with their records and ledger state
#[derive(Debug, Clone, Default)]
pub struct Person {
    pub name: String,
    pub earnings: Vec<Earning>,
    pub costs: Vec<Cost>,
    cumulative_credit: f64,
    monthly_credit: BTreeMap<Month, f64>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Running credit (positive) or debt (negative) after the last reconciled month
    pub fn cumulative_credit(&self) -> f64 {
        self.cumulative_credit
    }

    /// Cumulative credit recorded at the end of each reconciled month
    pub fn monthly_credit(&self) -> &BTreeMap<Month, f64> {
        &self.monthly_credit
    }

    /// Every month in which this person has an earning or a cost
    pub fn active_months(&self) -> impl Iterator<Item = Month> + '_ {
        self.earnings
            .iter()
            .map(|e| Month::of(e.date))
            .chain(self.costs.iter().map(|c| Month::of(c.date)))
    }

    pub(crate) fn set_ledger(&mut self, cumulative: f64, history: BTreeMap<Month, f64>) {
        self.cumulative_credit = cumulative;
        self.monthly_credit = history;
    }
}

/// Exactly two persons sharing costs
///
/// Order only affects report labels: the fairness curve is symmetric under swap.
#[derive(Debug, Clone)]
pub struct Couple {
    pub person1: Person,
    pub person2: Person,
}

impl Couple {
    /// Build a couple from a list of persons, which must hold exactly two distinct names
    pub fn try_from_persons(persons: Vec<Person>) -> Result<Self, LedgerError> {
        let found = persons.len();
        let mut iter = persons.into_iter();
        match (iter.next(), iter.next(), iter.next()) {
            (Some(person1), Some(person2), None) if person1.name != person2.name => {
                Ok(Self { person1, person2 })
            }
            (Some(_), Some(_), None) => Err(LedgerError::InputCardinality { found: 1 }),
            _ => Err(LedgerError::InputCardinality { found }),
        }
    }

    /// All months with any activity for either person, in chronological order
    pub fn months(&self) -> Vec<Month> {
        let mut months: Vec<Month> = self
            .person1
            .active_months()
            .chain(self.person2.active_months())
            .collect();
        months.sort();
        months.dedup();
        months
    }
}
