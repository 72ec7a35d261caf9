//! Reconcile a household's shared costs from earnings and expense CSVs
//!
//! Prints the monthly breakdown and writes `ledger.csv` / `ledger.json`
//! into the output directory.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fair_share::{load_records, report, Reconciler, RunConfig, StrategyKind};
use log::info;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// One fairness curve over the whole monthly cost
    Flat,
    /// Progressive cost bands
    Bands,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Flat => StrategyKind::Flat,
            StrategyArg::Bands => StrategyKind::Bands,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Split shared costs by earnings and track who owes whom")]
struct Args {
    /// JSON run configuration; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Earnings CSV (date,name,amount)
    #[arg(long)]
    earnings: Option<PathBuf>,

    /// Expenses CSV (date,amount,currency,payer,description)
    #[arg(long)]
    expenses: Option<PathBuf>,

    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Sensitivity of the flat curve; lower values diverge from 50/50 faster
    #[arg(long)]
    sensitivity: Option<f64>,

    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip the per-month console breakdown
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> Result<(RunConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        if let Some(path) = self.earnings {
            config.earnings_path = path;
        }
        if let Some(path) = self.expenses {
            config.expenses_path = path;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        if let Some(sensitivity) = self.sensitivity {
            config.sensitivity = sensitivity;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        Ok((config, self.quiet))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let (config, quiet) = Args::parse().into_config()?;

    let store = load_records(&config.earnings_path, &config.expenses_path)
        .context("Failed to load records")?;
    let mut couple = store.into_couple().context("Failed to build couple")?;

    let reconciler = Reconciler::from_config(&config.strategy_config())
        .context("Invalid strategy configuration")?;
    let ledger = reconciler
        .reconcile(&mut couple)
        .context("Reconciliation aborted")?;

    if !quiet {
        report::write_text(&ledger, &couple, io::stdout().lock())?;
    }

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let csv_path = config.output_dir.join("ledger.csv");
    let csv_file = File::create(&csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;
    report::write_csv(&ledger, &couple, BufWriter::new(csv_file))?;
    println!("Ledger written to {}", csv_path.display());

    let json_path = config.output_dir.join("ledger.json");
    let json_file = File::create(&json_path)
        .with_context(|| format!("Failed to create {}", json_path.display()))?;
    report::write_json(&ledger, &couple, BufWriter::new(json_file))?;
    println!("Chart data written to {}", json_path.display());

    println!(
        "\nFinal balance: {} {:.2}, {} {:.2}",
        couple.person1.name,
        couple.person1.cumulative_credit(),
        couple.person2.name,
        couple.person2.cumulative_credit()
    );
    info!("Reconciled {} months in {:?}", ledger.len(), start.elapsed());
    Ok(())
}
