#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use analysis::{
    AnalysisOutput, AnalysisReport, AnalysisRequest, DirectionalChange, MarketProfile,
    PivotDetector, ProfileEngine, ProfileParams, VolumeProfile, ZigZag, analyze_all,
};
pub use data::{load_bar_series, write_bar_series};
pub use domain::{Bar, BarSeries, LabeledPivot, Pivot, PivotKind, PivotSeries};
pub use error::{AnalysisError, AnalysisResult, ConfigurationError, DataError};
pub use models::{PointOfControl, PriceBin, Profile, ProfileKind, ValueArea};

// CLI argument parsing
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use config::{DEFAULT_BIN_COUNT, DEFAULT_DEPTH, DEFAULT_THRESHOLD_PCT, DEFAULT_VALUE_AREA_PCT};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Threshold zig-zag pivots confirmed on close
    DirectionalChange {
        #[command(flatten)]
        input: InputArgs,
        /// Reversal size in percent
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_PCT, allow_negative_numbers = true)]
        threshold: f64,
    },
    /// Depth-window local extrema filtered into alternating pivots
    Zigzag {
        #[command(flatten)]
        input: InputArgs,
        /// Reversal size in percent
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_PCT, allow_negative_numbers = true)]
        threshold: f64,
        /// Bars on each side a candidate must dominate
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,
    },
    /// Time-at-price (TPO) profile with POC and value area
    MarketProfile {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Volume-at-price profile with POC and value area
    VolumeProfile {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        profile: ProfileArgs,
    },
}

/// Where the bars come from and how results are printed.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// OHLCV CSV file(s) with a Date,Open,High,Low,Close,Volume header
    #[arg(long, short, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Drop bars before this date (epoch ms, YYYY-MM-DD, or YYYY-MM-DD HH:MM:SS)
    #[arg(long)]
    pub since: Option<String>,

    /// Drop bars after this date
    #[arg(long)]
    pub until: Option<String>,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ProfileArgs {
    /// Number of price levels
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
    pub bins: usize,

    /// Value area size in percent of total weight
    #[arg(long, default_value_t = DEFAULT_VALUE_AREA_PCT)]
    pub value_area: u32,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Text,
}

impl From<ProfileArgs> for ProfileParams {
    fn from(args: ProfileArgs) -> Self {
        ProfileParams {
            bin_count: args.bins,
            value_area_pct: args.value_area,
        }
    }
}

impl Command {
    pub fn input(&self) -> &InputArgs {
        match self {
            Command::DirectionalChange { input, .. }
            | Command::Zigzag { input, .. }
            | Command::MarketProfile { input, .. }
            | Command::VolumeProfile { input, .. } => input,
        }
    }

    pub fn request(&self) -> AnalysisRequest {
        match *self {
            Command::DirectionalChange { threshold, .. } => AnalysisRequest::DirectionalChange {
                threshold_pct: threshold,
            },
            Command::Zigzag {
                threshold, depth, ..
            } => AnalysisRequest::ZigZag {
                threshold_pct: threshold,
                depth,
            },
            Command::MarketProfile { profile, .. } => {
                AnalysisRequest::MarketProfile(profile.into())
            }
            Command::VolumeProfile { profile, .. } => {
                AnalysisRequest::VolumeProfile(profile.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_arguments_map_to_request() {
        let cli = Cli::try_parse_from([
            "pivot-profile",
            "zigzag",
            "--input",
            "a.csv",
            "b.csv",
            "--threshold",
            "2.5",
            "--depth",
            "3",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(
            cli.command.request(),
            AnalysisRequest::ZigZag {
                threshold_pct: 2.5,
                depth: 3
            }
        );
        let input = cli.command.input();
        assert_eq!(input.input.len(), 2);
        assert_eq!(input.format, OutputFormat::Json);
    }

    #[test]
    fn profile_defaults_come_from_config() {
        let cli =
            Cli::try_parse_from(["pivot-profile", "volume-profile", "-i", "data.csv"]).unwrap();
        assert_eq!(
            cli.command.request(),
            AnalysisRequest::VolumeProfile(ProfileParams::default())
        );
        assert_eq!(cli.command.input().format, OutputFormat::Text);
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["pivot-profile", "market-profile"]).is_err());
    }
}
