//! Formatting of the reconciled ledger
//!
//! These functions only present figures already computed by the reconciler.

use crate::ledger::{Couple, LedgerReport, Month, MonthlyMetrics};
use serde::Serialize;
use std::io::{self, Write};

const SEPARATOR: &str = "---------------------------------------------";

/// Write the per-month breakdown, labelled with the persons' names
pub fn write_text<W: Write>(
    report: &LedgerReport,
    couple: &Couple,
    mut out: W,
) -> io::Result<()> {
    let p1 = &couple.person1.name;
    let p2 = &couple.person2.name;

    for (month, m) in report {
        writeln!(out, "Month: {month}")?;
        writeln!(out, "{p1} Earnings: {:.2}", m.person1_earnings)?;
        writeln!(out, "{p2} Earnings: {:.2}", m.person2_earnings)?;
        writeln!(out, "{p1} Costs: {:.2}", m.person1_costs)?;
        writeln!(out, "{p2} Costs: {:.2}", m.person2_costs)?;
        writeln!(out, "{p1} Percentage: {:.2}%", m.person1_percentage)?;
        writeln!(out, "{p2} Percentage: {:.2}%", m.person2_percentage)?;
        writeln!(out, "{p1} Contribution Should Be: {:.2}", m.person1_due)?;
        writeln!(out, "{p2} Contribution Should Be: {:.2}", m.person2_due)?;
        writeln!(out, "{p1} Credit/Debt: {:.2}", m.person1_credit)?;
        writeln!(out, "{p2} Credit/Debt: {:.2}", m.person2_credit)?;
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    month: Month,
    person1: &'a str,
    person2: &'a str,
    person1_earnings: f64,
    person2_earnings: f64,
    person1_costs: f64,
    person2_costs: f64,
    person1_percentage: f64,
    person2_percentage: f64,
    person1_due: f64,
    person2_due: f64,
    person1_credit: f64,
    person2_credit: f64,
    total_earnings: f64,
    total_costs: f64,
}

/// One CSV row per month, with a header
pub fn write_csv<W: Write>(
    report: &LedgerReport,
    couple: &Couple,
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (month, m) in report {
        csv_writer.serialize(CsvRow {
            month: *month,
            person1: &couple.person1.name,
            person2: &couple.person2.name,
            person1_earnings: m.person1_earnings,
            person2_earnings: m.person2_earnings,
            person1_costs: m.person1_costs,
            person2_costs: m.person2_costs,
            person1_percentage: m.person1_percentage,
            person2_percentage: m.person2_percentage,
            person1_due: m.person1_due,
            person2_due: m.person2_due,
            person1_credit: m.person1_credit,
            person2_credit: m.person2_credit,
            total_earnings: m.total_earnings,
            total_costs: m.total_costs,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct Series {
    label: String,
    values: Vec<f64>,
}

/// Chart feed: month axis plus named line series
#[derive(Debug, Serialize)]
struct ChartData {
    title: &'static str,
    months: Vec<Month>,
    series: Vec<Series>,
}

fn series(
    label: String,
    report: &LedgerReport,
    value: impl Fn(&MonthlyMetrics) -> f64,
) -> Series {
    Series {
        label,
        values: report.values().map(value).collect(),
    }
}

/// JSON document consumed by an external chart renderer
pub fn write_json<W: Write>(
    report: &LedgerReport,
    couple: &Couple,
    writer: W,
) -> Result<(), serde_json::Error> {
    let data = ChartData {
        title: "Financial Overview",
        months: report.keys().copied().collect(),
        series: vec![
            series("Total Earnings".to_string(), report, |m| m.total_earnings),
            series("Total Costs".to_string(), report, |m| m.total_costs),
            series(format!("{} Credit", couple.person1.name), report, |m| m.person1_credit),
            series(format!("{} Credit", couple.person2.name), report, |m| m.person2_credit),
        ],
    };
    serde_json::to_writer_pretty(writer, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::FlatCurveStrategy;
    use crate::ledger::{Cost, Earning, Person, Reconciler};
    use chrono::NaiveDate;

    fn fixture() -> (LedgerReport, Couple) {
        let persons = vec![Person::new("anna"), Person::new("luca")];
        let couple = Couple::try_from_persons(persons).unwrap();
        let mut report = LedgerReport::new();
        report.insert(
            Month::new(2024, 1).unwrap(),
            MonthlyMetrics {
                person1_earnings: 5000.0,
                person2_earnings: 1000.0,
                person2_costs: 1000.0,
                person1_percentage: 91.09,
                person2_percentage: 8.91,
                person1_due: 910.9,
                person2_due: 89.1,
                person1_credit: -910.9,
                person2_credit: 910.9,
                total_earnings: 6000.0,
                total_costs: 1000.0,
                ..Default::default()
            },
        );
        (report, couple)
    }

    #[test]
    fn test_write_text() {
        let (report, couple) = fixture();
        let mut buffer = Vec::new();
        write_text(&report, &couple, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Month: 2024/01\n"));
        assert!(text.contains("anna Percentage: 91.09%"));
        assert!(text.contains("luca Credit/Debt: 910.90"));
        assert!(text.contains(SEPARATOR));
    }

    #[test]
    fn test_write_csv() {
        let (report, couple) = fixture();
        let mut buffer = Vec::new();
        write_csv(&report, &couple, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("month,person1,person2,person1_earnings"));
        assert!(lines.next().unwrap().starts_with("2024/01,anna,luca,5000.0,1000.0"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_json() {
        let (report, couple) = fixture();
        let mut buffer = Vec::new();
        write_json(&report, &couple, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["months"][0], "2024/01");
        assert_eq!(value["series"][2]["label"], "anna Credit");
        assert_eq!(value["series"][3]["values"][0], 910.9);
    }

    #[test]
    fn test_person_without_costs_reports_zero() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut anna = Person::new("anna");
        let mut luca = Person::new("luca");
        anna.earnings.push(Earning { date: day, amount: 1000.0 });
        luca.earnings.push(Earning { date: day, amount: 1000.0 });
        anna.costs.push(Cost {
            date: day,
            amount: 100.0,
            currency: "EUR".to_string(),
            payer: "anna".to_string(),
            description: "groceries".to_string(),
        });
        let mut couple = Couple::try_from_persons(vec![anna, luca]).unwrap();
        let reconciler = Reconciler::new(Box::new(FlatCurveStrategy::default()));
        let report = reconciler.reconcile(&mut couple).unwrap();

        let mut buffer = Vec::new();
        write_text(&report, &couple, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("luca Costs: 0.00\n"));
        assert!(!text.contains("-0.00"));

        let mut buffer = Vec::new();
        write_csv(&report, &couple, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("2024/01,anna,luca,1000.0,1000.0,100.0,0.0,"));
    }
}
