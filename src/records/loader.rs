//! Load earning and expense records from CSV
//!
//! Earnings file columns: `date,name,amount`
//! Expenses file columns: `date,amount,currency,payer,description`
//!
//! Both files start with a header row and use `YYYY/MM/DD` dates.

use super::RecordStore;
use crate::error::RecordError;
use crate::ledger::{Cost, Earning};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DATE_FORMAT: &str = "%Y/%m/%d";
const EARNINGS_FILE: &str = "earnings file";
const EXPENSES_FILE: &str = "expenses file";

#[derive(Debug, Deserialize)]
struct EarningRow {
    date: String,
    name: String,
    amount: String,
}

#[derive(Debug, Deserialize)]
struct ExpenseRow {
    date: String,
    amount: String,
    currency: String,
    payer: String,
    description: String,
}

fn parse_date(value: &str, file: &'static str, line: u64) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| RecordError::InvalidDate {
        file,
        line,
        value: value.to_string(),
    })
}

fn parse_amount(value: &str, file: &'static str, line: u64) -> Result<f64, RecordError> {
    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(RecordError::InvalidAmount {
            file,
            line,
            value: value.to_string(),
        }),
    }
}

/// Iterate data rows positionally, yielding each with its 1-based file line
fn read_rows<R, T>(reader: R, file: &'static str) -> Result<Vec<(u64, T)>, RecordError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|source| RecordError::Csv { file, source })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: T = record
            .deserialize(None)
            .map_err(|source| RecordError::Csv { file, source })?;
        rows.push((line, row));
    }

    if rows.is_empty() {
        return Err(RecordError::Empty { file });
    }
    Ok(rows)
}

/// Add earnings from any reader into the store
///
/// Every row is parsed before the store is touched, so a bad row leaves it unchanged.
pub fn load_earnings_from_reader<R: Read>(
    reader: R,
    store: &mut RecordStore,
) -> Result<usize, RecordError> {
    let rows: Vec<(u64, EarningRow)> = read_rows(reader, EARNINGS_FILE)?;
    let earnings = rows
        .into_iter()
        .map(|(line, row)| {
            let earning = Earning {
                date: parse_date(&row.date, EARNINGS_FILE, line)?,
                amount: parse_amount(&row.amount, EARNINGS_FILE, line)?,
            };
            Ok((row.name, earning))
        })
        .collect::<Result<Vec<_>, RecordError>>()?;

    let count = earnings.len();
    for (name, earning) in earnings {
        store.person_mut(&name).earnings.push(earning);
    }
    Ok(count)
}

/// Add expenses from any reader into the store, keyed by payer
///
/// All-or-nothing like [`load_earnings_from_reader`].
pub fn load_expenses_from_reader<R: Read>(
    reader: R,
    store: &mut RecordStore,
) -> Result<usize, RecordError> {
    let rows: Vec<(u64, ExpenseRow)> = read_rows(reader, EXPENSES_FILE)?;
    let costs = rows
        .into_iter()
        .map(|(line, row)| {
            Ok(Cost {
                date: parse_date(&row.date, EXPENSES_FILE, line)?,
                amount: parse_amount(&row.amount, EXPENSES_FILE, line)?,
                currency: row.currency,
                payer: row.payer,
                description: row.description,
            })
        })
        .collect::<Result<Vec<_>, RecordError>>()?;

    let count = costs.len();
    for cost in costs {
        let payer = cost.payer.clone();
        store.person_mut(&payer).costs.push(cost);
    }
    Ok(count)
}

fn open(path: &Path) -> Result<File, RecordError> {
    File::open(path).map_err(|source| RecordError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load both files; earnings first, so person order follows the earnings file
pub fn load_records(
    earnings_path: impl AsRef<Path>,
    expenses_path: impl AsRef<Path>,
) -> Result<RecordStore, RecordError> {
    let mut store = RecordStore::default();

    let earnings = load_earnings_from_reader(open(earnings_path.as_ref())?, &mut store)?;
    info!("Loaded {} earnings from {}", earnings, earnings_path.as_ref().display());

    let expenses = load_expenses_from_reader(open(expenses_path.as_ref())?, &mut store)?;
    info!("Loaded {} expenses from {}", expenses, expenses_path.as_ref().display());

    Ok(store)
}
