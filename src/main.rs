mod error;
mod generate;
mod input;
mod report;
mod series;
mod stats;

use crate::generate::GenerateConfig;
use crate::report::Report;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quote a due date for a batch of future completions.
    Quote {
        /// CSV file with an `inter_throughput_time` column (in hours).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Comma-separated inter-throughput times (in hours).
        #[arg(long, conflicts_with = "data")]
        values: Option<String>,

        /// Number of future completions covered by the quote.
        #[arg(long, default_value_t = 1)]
        batch_size: usize,

        /// Requested confidence level, strictly between 0 and 1.
        #[arg(long, default_value_t = 0.90)]
        confidence: f64,

        /// Write a JSON report to this file.
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print descriptive statistics of an observation series.
    Stats {
        /// CSV file with an `inter_throughput_time` column (in hours).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Comma-separated inter-throughput times (in hours).
        #[arg(long, conflicts_with = "data")]
        values: Option<String>,

        /// Write a JSON report to this file.
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Synthesize an AR(1) inter-throughput series and write it as CSV.
    Generate {
        #[arg(long)]
        out: PathBuf,

        #[arg(long, default_value_t = 30)]
        count: usize,

        #[arg(long, default_value_t = 38.0)]
        mean: f64,

        #[arg(long, default_value_t = 6.0)]
        std_dev: f64,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        autocorr: f64,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write the bundled case-study dataset as CSV.
    Example {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    match args.command {
        Command::Quote {
            data,
            values,
            batch_size,
            confidence,
            report,
        } => run_quote(
            data.as_deref(),
            values.as_deref(),
            batch_size,
            confidence,
            report.as_deref(),
        )?,

        Command::Stats {
            data,
            values,
            report,
        } => run_stats(data.as_deref(), values.as_deref(), report.as_deref())?,

        Command::Generate {
            out,
            count,
            mean,
            std_dev,
            autocorr,
            seed,
        } => {
            let cfg = GenerateConfig {
                count,
                mean,
                std_dev,
                autocorr,
                seed,
            };
            let values = generate::generate_series(&cfg).context("failed to generate series")?;
            input::write_csv(&out, &values).context("failed to write series")?;
            log::info!("wrote {} observations to {out:?}", values.len());
        }

        Command::Example { out } => {
            input::write_csv(&out, &input::EXAMPLE_DATA).context("failed to write example data")?;
            log::info!("wrote {} observations to {out:?}", input::EXAMPLE_DATA.len());
        }
    }

    Ok(())
}

fn run_stats(data: Option<&Path>, values: Option<&str>, report_file: Option<&Path>) -> Result<()> {
    let series = input::load_series(data, values).context("failed to load observations")?;
    let statistics = stats::compute_statistics(&series).context("failed to compute statistics")?;

    let mut out = stdout().lock();
    report::write_statistics(&mut out, series.values(), &statistics)?;
    report::log_autocorr_note(statistics.lag_1_autocorr);

    if let Some(file) = report_file {
        let report = Report {
            observations: series.values().len(),
            statistics,
            quote: None,
        };
        report.save(file).context("failed to save report")?;
        log::info!("wrote report to {file:?}");
    }

    Ok(())
}

fn run_quote(
    data: Option<&Path>,
    values: Option<&str>,
    batch_size: usize,
    confidence: f64,
    report_file: Option<&Path>,
) -> Result<()> {
    let series = input::load_series(data, values).context("failed to load observations")?;
    let statistics = stats::compute_statistics(&series).context("failed to compute statistics")?;
    let quote =
        stats::quote(&series, batch_size, confidence).context("failed to quote due date")?;

    let mut out = stdout().lock();
    report::write_statistics(&mut out, series.values(), &statistics)?;
    writeln!(out)?;
    report::write_quote(&mut out, &quote)?;
    report::log_autocorr_note(statistics.lag_1_autocorr);

    if let Some(file) = report_file {
        let report = Report {
            observations: series.values().len(),
            statistics,
            quote: Some(quote),
        };
        report.save(file).context("failed to save report")?;
        log::info!("wrote report to {file:?}");
    }

    Ok(())
}
