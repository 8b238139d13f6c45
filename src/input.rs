//! Input adapters: CSV files, manually entered value lists and the bundled
//! case-study dataset.

use crate::series::ObservationSeries;
use anyhow::{Context, Result, bail};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Header of the single required column of the CSV input format.
pub const COLUMN_HEADER: &str = "inter_throughput_time";

/// Inter-throughput times (in hours) from the boat production case study.
pub const EXAMPLE_DATA: [f64; 29] = [
    32.5, 35.5, 40.0, 38.5, 29.5, 37.0, 40.0, 49.0, 44.0, 33.5, 44.0, 37.5, 47.0, 49.0, 45.0,
    37.5, 30.0, 32.0, 34.5, 34.0, 51.0, 48.0, 41.5, 39.5, 36.0, 31.0, 36.0, 41.0, 34.0,
];

/// Load an observation series from exactly one of the two input methods.
pub fn load_series(data: Option<&Path>, values: Option<&str>) -> Result<ObservationSeries> {
    match (data, values) {
        (Some(file), None) => read_csv(file),
        (None, Some(list)) => parse_values(list),
        (None, None) => bail!("either --data or --values must be given"),
        (Some(_), Some(_)) => bail!("--data and --values are mutually exclusive"),
    }
}

/// Read an observation series from a single-column CSV file.
///
/// The header row must name the column `inter_throughput_time`; every
/// following line holds one positive numeric value. Blank lines are skipped.
pub fn read_csv<P: AsRef<Path>>(file: P) -> Result<ObservationSeries> {
    let file = file.as_ref();
    let handle = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    let reader = BufReader::new(handle);

    let mut values = Vec::new();
    let mut saw_header = false;
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", line_idx + 1))?;
        let field = line.trim();
        if field.is_empty() {
            continue;
        }
        if !saw_header {
            if field != COLUMN_HEADER {
                bail!("column header must be {COLUMN_HEADER:?}, but is {field:?}");
            }
            saw_header = true;
            continue;
        }
        let value: f64 = field
            .parse()
            .with_context(|| format!("line {} is not a number: {field:?}", line_idx + 1))?;
        values.push(value);
    }
    if !saw_header {
        bail!("{file:?} is empty");
    }

    ObservationSeries::new(values).context("invalid observation data")
}

/// Parse a comma-separated list of manually entered values.
pub fn parse_values(list: &str) -> Result<ObservationSeries> {
    let mut values = Vec::new();
    for entry in list.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let value: f64 = entry
            .parse()
            .with_context(|| format!("entry {entry:?} is not a number"))?;
        values.push(value);
    }
    ObservationSeries::new(values).context("invalid observation data")
}

/// Write an observation series in the CSV input format.
pub fn write_csv<P: AsRef<Path>>(file: P, values: &[f64]) -> Result<()> {
    let file = file.as_ref();
    let handle = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(handle);

    writeln!(writer, "{COLUMN_HEADER}")?;
    for value in values {
        writeln!(writer, "{value}")?;
    }
    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}
