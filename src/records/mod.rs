//! Record store fed by the CSV loaders

pub mod loader;

pub use loader::{load_earnings_from_reader, load_expenses_from_reader, load_records};

use crate::error::LedgerError;
use crate::ledger::{Couple, Person};

/// Persons keyed by name, kept in first-seen order
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    persons: Vec<Person>,
}

impl RecordStore {
    /// Person with the given name, created on first use
    pub fn person_mut(&mut self, name: &str) -> &mut Person {
        let index = match self.persons.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.persons.push(Person::new(name));
                self.persons.len() - 1
            }
        };
        &mut self.persons[index]
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Turn the store into a couple; fails unless exactly two persons are present
    pub fn into_couple(self) -> Result<Couple, LedgerError> {
        Couple::try_from_persons(self.persons)
    }
}
