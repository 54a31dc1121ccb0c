//! Directional-change pivot detection.
//!
//! A two-state machine walks the bars once. While rising it tracks the
//! running peak; a close at or below `peak * (1 - threshold)` confirms that
//! peak as a High pivot and flips to falling, where the running valley is
//! tracked the same way. The swing still forming at the end of the series is
//! never emitted.

use crate::analysis::detector::{PivotDetector, threshold_fraction};
use crate::domain::{BarSeries, Pivot, PivotSeries};
use crate::error::AnalysisResult;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Swing {
    Up,
    Down,
}

/// A pivot together with the bar whose close confirmed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confirmation {
    pub pivot: Pivot,
    pub confirmed_at: usize,
}

/// Run the state machine over aligned price columns.
///
/// `threshold` is a fraction (0.05 = 5%). Columns must have equal length.
pub fn find_directional_pivots(close: &[f64], high: &[f64], low: &[f64], threshold: f64) -> Vec<Pivot> {
    trace_directional_pivots(close, high, low, threshold)
        .into_iter()
        .map(|c| c.pivot)
        .collect()
}

/// Same walk as [`find_directional_pivots`], keeping the confirming bar of
/// each pivot.
pub fn trace_directional_pivots(
    close: &[f64],
    high: &[f64],
    low: &[f64],
    threshold: f64,
) -> Vec<Confirmation> {
    debug_assert!(close.len() == high.len() && high.len() == low.len());
    let mut confirmed = Vec::new();
    if close.is_empty() {
        return confirmed;
    }

    let mut swing = Swing::Up;
    let (mut peak, mut peak_idx) = (high[0], 0);
    let (mut valley, mut valley_idx) = (low[0], 0);

    for i in 1..close.len() {
        match swing {
            Swing::Up => {
                if high[i] > peak {
                    peak = high[i];
                    peak_idx = i;
                } else if close[i] <= peak * (1.0 - threshold) {
                    confirmed.push(Confirmation {
                        pivot: Pivot::high(peak_idx, peak),
                        confirmed_at: i,
                    });
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_pivot_trace {
                        log::info!("DC: High {:.4} @ {} confirmed by bar {}", peak, peak_idx, i);
                    }
                    swing = Swing::Down;
                    valley = low[i];
                    valley_idx = i;
                }
            }
            Swing::Down => {
                if low[i] < valley {
                    valley = low[i];
                    valley_idx = i;
                } else if close[i] >= valley * (1.0 + threshold) {
                    confirmed.push(Confirmation {
                        pivot: Pivot::low(valley_idx, valley),
                        confirmed_at: i,
                    });
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_pivot_trace {
                        log::info!("DC: Low {:.4} @ {} confirmed by bar {}", valley, valley_idx, i);
                    }
                    swing = Swing::Up;
                    peak = high[i];
                    peak_idx = i;
                }
            }
        }
    }

    confirmed
}

/// Threshold zig-zag detector. The threshold is a percentage.
#[derive(Debug, Clone, Default)]
pub struct DirectionalChange {
    pub threshold_pct: f64,
    last: Option<PivotSeries>,
}

impl DirectionalChange {
    pub fn new(threshold_pct: f64) -> Self {
        Self {
            threshold_pct,
            last: None,
        }
    }
}

impl PivotDetector for DirectionalChange {
    fn name(&self) -> &'static str {
        "DirectionalChange"
    }

    fn find_pivots(&self, series: &BarSeries) -> AnalysisResult<PivotSeries> {
        let threshold = threshold_fraction(self.threshold_pct)?;
        let pivots = find_directional_pivots(series.close(), series.high(), series.low(), threshold);
        Ok(PivotSeries::new(pivots))
    }

    fn last_pivots(&self) -> Option<&PivotSeries> {
        self.last.as_ref()
    }

    fn store_pivots(&mut self, pivots: PivotSeries) -> &PivotSeries {
        self.last.insert(pivots)
    }
}
