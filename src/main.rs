use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::Path;

use pivot_profile::report::{bar_interval_ms, render_text};
use pivot_profile::utils::time_utils::parse_timestamp_ms;
use pivot_profile::{BarSeries, Cli, InputArgs, OutputFormat, analyze_all, load_bar_series};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::debug!("Parsed arguments: {:?}", args);

    // C. Data Loading
    let input = args.command.input();
    let named_series = input
        .input
        .iter()
        .map(|path| Ok((series_name(path), load_windowed(path, input)?)))
        .collect::<Result<Vec<(String, BarSeries)>>>()?;

    // D. Analysis
    let request = args.command.request();
    log::info!("Running {} over {} series", request.label(), named_series.len());
    let results = analyze_all(&named_series, &request);

    // E. Output
    let mut failures = 0;
    for ((name, series), result) in named_series.iter().zip(results) {
        match result {
            Ok(report) => match input.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => {
                    print!("{}", render_text(&report, bar_interval_ms(series.timestamps_ms())))
                }
            },
            Err(e) => {
                log::error!("{}: {}", name, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} analyses failed", failures, named_series.len()));
    }
    Ok(())
}

fn series_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_windowed(path: &Path, input: &InputArgs) -> Result<BarSeries> {
    let series = load_bar_series(path)?;
    if input.since.is_none() && input.until.is_none() {
        return Ok(series);
    }

    let since = parse_bound(input.since.as_deref(), "--since")?;
    let until = parse_bound(input.until.as_deref(), "--until")?;
    let (start, end) = series
        .get_indices_by_time_range(since, until)
        .with_context(|| format!("No bars in {:?} fall inside the requested window", path))?;
    Ok(series.slice(start, end))
}

fn parse_bound(text: Option<&str>, flag: &str) -> Result<Option<i64>> {
    text.map(|t| parse_timestamp_ms(t).ok_or_else(|| anyhow!("Unrecognized {} date: {:?}", flag, t)))
        .transpose()
}
