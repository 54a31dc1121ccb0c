use serde::{Deserialize, Serialize};

use crate::domain::bar::Bar;
use crate::error::{AnalysisResult, DataError};

// ============================================================================
// BarSeries: column-wise OHLCV data, validated on construction
// ============================================================================

/// Time-ordered OHLCV bars stored as aligned columns.
///
/// Every `BarSeries` that exists has passed data validation, so detectors and
/// engines only need to check their own parameters. The series may be empty;
/// profile engines reject that case themselves.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    timestamps_ms: Vec<i64>,

    // Prices
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,

    volume: Vec<f64>,
}

impl BarSeries {
    /// Build a series from aligned columns.
    ///
    /// Fails with a `DataError` on mismatched lengths, non-increasing
    /// timestamps, non-finite values, `low > high` or negative volume.
    pub fn from_columns(
        timestamps_ms: Vec<i64>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Vec<f64>,
    ) -> AnalysisResult<Self> {
        let series = BarSeries {
            timestamps_ms,
            open,
            high,
            low,
            close,
            volume,
        };
        series.validate()?;
        Ok(series)
    }

    pub fn from_bars(bars: &[Bar]) -> AnalysisResult<Self> {
        Self::from_columns(
            bars.iter().map(|b| b.timestamp_ms).collect(),
            bars.iter().map(|b| b.open).collect(),
            bars.iter().map(|b| b.high).collect(),
            bars.iter().map(|b| b.low).collect(),
            bars.iter().map(|b| b.close).collect(),
            bars.iter().map(|b| b.volume).collect(),
        )
    }

    /// Convenience for tests and demos: one bar per close, with high and low
    /// equal to the close and unit volume. Timestamps are the indices.
    pub fn from_closes(closes: &[f64]) -> AnalysisResult<Self> {
        let bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(i, &price)| Bar::flat(i as i64, price, 1.0))
            .collect();
        Self::from_bars(&bars)
    }

    fn validate(&self) -> Result<(), DataError> {
        let expected = self.timestamps_ms.len();
        let columns: [(&'static str, usize); 5] = [
            ("open", self.open.len()),
            ("high", self.high.len()),
            ("low", self.low.len()),
            ("close", self.close.len()),
            ("volume", self.volume.len()),
        ];
        for (column, actual) in columns {
            if actual != expected {
                return Err(DataError::LengthMismatch {
                    column,
                    expected,
                    actual,
                });
            }
        }

        for (index, pair) in self.timestamps_ms.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(DataError::NonMonotonicTimestamp {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }

        for index in 0..expected {
            let bar = self.get_bar(index);
            let fields = [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
                ("volume", bar.volume),
            ];
            if let Some(&(field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(DataError::NonFinite { index, field });
            }
            if bar.low > bar.high {
                return Err(DataError::LowAboveHigh {
                    index,
                    low: bar.low,
                    high: bar.high,
                });
            }
            for (field, value) in [("open", bar.open), ("close", bar.close)] {
                if value < bar.low || value > bar.high {
                    return Err(DataError::PriceOutsideRange {
                        index,
                        field,
                        value,
                        low: bar.low,
                        high: bar.high,
                    });
                }
            }
            if bar.volume < 0.0 {
                return Err(DataError::NegativeVolume {
                    index,
                    volume: bar.volume,
                });
            }
        }

        Ok(())
    }

    pub fn get_bar(&self, idx: usize) -> Bar {
        Bar::new(
            self.timestamps_ms[idx],
            self.open[idx],
            self.high[idx],
            self.low[idx],
            self.close[idx],
            self.volume[idx],
        )
    }

    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        (0..self.len()).map(|idx| self.get_bar(idx))
    }

    pub fn len(&self) -> usize {
        self.timestamps_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps_ms.is_empty()
    }

    pub fn timestamps_ms(&self) -> &[i64] {
        &self.timestamps_ms
    }

    pub fn open(&self) -> &[f64] {
        &self.open
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    pub fn total_volume(&self) -> f64 {
        self.volume.iter().sum()
    }

    /// Index range `[start, end)` of bars whose timestamps fall inside the
    /// (inclusive) window. Either bound may be open. Returns `None` when no
    /// bar qualifies.
    pub fn get_indices_by_time_range(
        &self,
        start_ms: Option<i64>,
        end_ms: Option<i64>,
    ) -> Option<(usize, usize)> {
        // Timestamps are strictly increasing, so both ends are binary searches.
        let start_index = match start_ms {
            Some(start) => self.timestamps_ms.partition_point(|&ts| ts < start),
            None => 0,
        };
        let end_index = match end_ms {
            Some(end) => self.timestamps_ms.partition_point(|&ts| ts <= end),
            None => self.len(),
        };

        if start_index >= end_index {
            return None;
        }
        Some((start_index, end_index))
    }

    /// Copy of the bars in `[start, end)`. Slicing a valid series keeps it
    /// valid, so no re-validation happens.
    pub fn slice(&self, start: usize, end: usize) -> BarSeries {
        let end = end.min(self.len());
        let start = start.min(end);
        BarSeries {
            timestamps_ms: self.timestamps_ms[start..end].to_vec(),
            open: self.open[start..end].to_vec(),
            high: self.high[start..end].to_vec(),
            low: self.low[start..end].to_vec(),
            close: self.close[start..end].to_vec(),
            volume: self.volume[start..end].to_vec(),
        }
    }
}
