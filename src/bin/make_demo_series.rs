use anyhow::{Result, bail};
use clap::Parser;
use std::f64::consts::TAU;
use std::path::PathBuf;

use pivot_profile::config::data_csv_path;
use pivot_profile::utils::TimeUtils;
use pivot_profile::{Bar, BarSeries, write_bar_series};

// 2024-01-01 00:00:00 UTC
const START_MS: i64 = 1_704_067_200_000;

/// Write a deterministic synthetic OHLCV series for exercising the CLI offline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct DemoArgs {
    /// Number of hourly bars
    #[arg(long, default_value_t = 500)]
    bars: usize,

    /// Output CSV path (defaults to the data directory)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = DemoArgs::parse();
    if args.bars == 0 {
        bail!("--bars must be at least 1");
    }

    let series = demo_series(args.bars)?;
    let output_path = args.output.unwrap_or_else(|| data_csv_path("demo", "1h"));
    write_bar_series(&output_path, &series)?;

    println!(
        "✅ Demo series written to {:?} with {} bars.",
        output_path,
        series.len()
    );
    Ok(())
}

/// Slow drift plus a long and a short cycle, so both detectors have swings
/// of several sizes to find.
fn demo_series(n_bars: usize) -> Result<BarSeries> {
    let mut bars = Vec::with_capacity(n_bars);
    let mut prev_close = synthetic_price(0.0);

    for i in 0..n_bars {
        let t = i as f64;
        let close = synthetic_price(t + 1.0);
        let open = prev_close;
        let wick = 0.3 + 0.2 * (t * 0.7).sin().abs();
        let high = open.max(close) + wick;
        let low = open.min(close) - wick;
        let volume = 1_000.0 + 400.0 * (TAU * t / 24.0).sin().abs() + 5.0 * (close - open).abs();

        bars.push(Bar::new(
            START_MS + i as i64 * TimeUtils::MS_IN_H,
            open,
            high,
            low,
            close,
            volume,
        ));
        prev_close = close;
    }

    Ok(BarSeries::from_bars(&bars)?)
}

fn synthetic_price(t: f64) -> f64 {
    100.0 + 0.02 * t + 6.0 * (TAU * t / 120.0).sin() + 2.0 * (TAU * t / 17.0).sin()
}
