//! Error types for the analysis core.
//!
//! Everything the detectors and engines can reject falls into one of two
//! families: bad parameters (`ConfigurationError`) or bad input bars
//! (`DataError`). Outer layers wrap these in `anyhow` with context.

use thiserror::Error;

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("bar series is empty; a profile needs at least one bar")]
    EmptySeries,

    #[error("bin count must be at least 2 (got {0})")]
    BinCountTooSmall(usize),

    #[error("threshold must be a finite, non-negative percentage (got {0})")]
    InvalidThreshold(f64),

    #[error("zigzag depth must be at least 1 (got {0})")]
    InvalidDepth(usize),

    #[error("value area percent must be within 0..=100 (got {0})")]
    InvalidValueAreaPercent(u32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("column `{column}` has {actual} values, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("timestamps must be strictly increasing: bar {index} ({current} ms) follows {previous} ms")]
    NonMonotonicTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("bar {index} has low {low} above high {high}")]
    LowAboveHigh { index: usize, low: f64, high: f64 },

    #[error("bar {index} has {field} {value} outside its range [{low}, {high}]")]
    PriceOutsideRange {
        index: usize,
        field: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("bar {index} has a non-finite {field} value")]
    NonFinite { index: usize, field: &'static str },

    #[error("bar {index} has negative volume {volume}")]
    NegativeVolume { index: usize, volume: f64 },
}
