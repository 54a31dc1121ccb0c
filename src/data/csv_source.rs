use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Deserialize;

use crate::domain::{Bar, BarSeries};
use crate::utils::time_utils::{epoch_ms_to_utc, parse_timestamp_ms};

/// One CSV row. Headers are matched case-insensitively; extra columns
/// (e.g. `Adj Close`) are ignored.
#[derive(Debug, Deserialize)]
struct BarRecord {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Load a headered `Date,Open,High,Low,Close,Volume` file into a validated
/// series.
pub fn load_bar_series(path: &Path) -> Result<BarSeries> {
    let file = File::open(path).context(format!("Failed to open data file: {:?}", path))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .context(format!("Failed to read CSV header: {:?}", path))?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect::<StringRecord>();
    reader.set_headers(headers);

    let mut bars = Vec::new();
    // Line 1 is the header
    for (line, row) in (2..).zip(reader.deserialize::<BarRecord>()) {
        let record = row.context(format!("Bad row at {:?} line {}", path, line))?;
        let timestamp_ms = parse_timestamp_ms(&record.date).ok_or_else(|| {
            anyhow!(
                "Unrecognized date {:?} at {:?} line {}",
                record.date,
                path,
                line
            )
        })?;
        bars.push(Bar::new(
            timestamp_ms,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        ));
    }

    let series = BarSeries::from_bars(&bars)
        .context(format!("Invalid bar data in {:?}", path))?;
    log::info!("Loaded {} bars from {:?}", series.len(), path);
    Ok(series)
}

/// Write `series` in the layout `load_bar_series` reads, with UTC
/// `YYYY-MM-DD HH:MM:SS` dates.
pub fn write_bar_series(path: &Path, series: &BarSeries) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));

    writer.write_record(["Date", "Open", "High", "Low", "Close", "Volume"])?;
    for bar in series.bars() {
        writer
            .serialize((
                epoch_ms_to_utc(bar.timestamp_ms),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume,
            ))
            .context(format!("Failed to write row to: {}", path.display()))?;
    }
    writer
        .flush()
        .context(format!("Failed to flush: {}", path.display()))
}
