//! Presentation of statistics and quotes: aligned text tables for the
//! terminal and a JSON report file for downstream tooling.

use crate::stats::{Quote, SummaryStatistics};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

const HOURS_PER_DAY: f64 = 24.0;

/// Full outcome of an analysis, ready for serialization.
#[derive(Debug, Serialize)]
pub struct Report {
    pub observations: usize,
    pub statistics: SummaryStatistics,
    pub quote: Option<Quote>,
}

impl Report {
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let handle = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let writer = BufWriter::new(handle);
        serde_json::to_writer_pretty(writer, self).context("failed to serialize report")?;
        Ok(())
    }
}

pub fn write_statistics<W: Write>(
    out: &mut W,
    values: &[f64],
    stats: &SummaryStatistics,
) -> Result<()> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    writeln!(out, "observations         {:>10}", values.len())?;
    writeln!(out, "mean                 {:>10.2} h", stats.mean)?;
    writeln!(out, "std dev              {:>10.2} h", stats.std_dev)?;
    writeln!(out, "variance             {:>10.2} h^2", stats.variance)?;
    writeln!(out, "min                  {:>10.2} h", min)?;
    writeln!(out, "max                  {:>10.2} h", max)?;
    writeln!(out, "range                {:>10.2} h", max - min)?;
    writeln!(
        out,
        "coef of variation    {:>10.1} %",
        100.0 * stats.std_dev / stats.mean
    )?;
    writeln!(out, "lag-1 autocorr       {:>10.3}", stats.lag_1_autocorr)?;

    Ok(())
}

pub fn write_quote<W: Write>(out: &mut W, quote: &Quote) -> Result<()> {
    writeln!(out, "batch size           {:>10}", quote.batch_size)?;
    writeln!(out, "confidence level     {:>10.1} %", 100.0 * quote.confidence)?;
    writeln!(out, "inflation factor     {:>10.3}", quote.inflation_factor)?;
    writeln!(out, "z score              {:>10.3}", quote.z_score)?;
    writeln!(
        out,
        "expected time        {:>10.1} h ({:.1} days)",
        quote.expected_time,
        quote.expected_time / HOURS_PER_DAY
    )?;
    writeln!(out, "std error            {:>10.2} h", quote.std_error)?;
    writeln!(
        out,
        "safety time          {:>10.1} h ({:.1} days)",
        quote.safety_time,
        quote.safety_time / HOURS_PER_DAY
    )?;
    writeln!(
        out,
        "due date             {:>10.1} h ({:.1} days)",
        quote.due_date,
        quote.due_date / HOURS_PER_DAY
    )?;

    Ok(())
}

/// Log the practical reading of the lag-1 autocorrelation coefficient.
pub fn log_autocorr_note(rho_1: f64) {
    if rho_1 > 0.3 {
        log::warn!(
            "moderate positive autocorrelation ({rho_1:.3}): consecutive throughput times are related"
        );
    } else if rho_1 > 0.1 {
        log::info!("weak positive autocorrelation ({rho_1:.3})");
    } else {
        log::info!("negligible autocorrelation ({rho_1:.3})");
    }
}
