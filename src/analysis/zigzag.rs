//! ZigZag pivot detection.
//!
//! Stage A marks every bar whose high (low) is the extreme of the window
//! `[i - depth, i + depth]`, clipped at the series edges, as a High (Low)
//! candidate. Plateaus qualify, since the comparison is inclusive.
//!
//! Stage B walks the candidates in index order. An opposite-kind candidate is
//! accepted once it moves at least `threshold` away from the last pivot. A
//! same-kind candidate may replace the last pivot when it is a further
//! extreme and moves at least as far from the pivot before it.

use itertools::Itertools;

use crate::analysis::detector::{PivotDetector, threshold_fraction};
use crate::domain::{BarSeries, Pivot, PivotKind, PivotSeries};
use crate::error::{AnalysisResult, ConfigurationError};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Indices whose value is `>=` (highs) or `<=` (lows) every neighbour within
/// `depth` bars.
fn local_extrema(values: &[f64], depth: usize, kind: PivotKind) -> Vec<Pivot> {
    let n = values.len();
    (0..n)
        .filter(|&i| {
            let window = &values[i.saturating_sub(depth)..=(i + depth).min(n - 1)];
            match kind {
                PivotKind::High => window.iter().all(|&v| values[i] >= v),
                PivotKind::Low => window.iter().all(|&v| values[i] <= v),
            }
        })
        .map(|i| Pivot::new(i, values[i], kind))
        .collect()
}

/// Stage A: High and Low candidates merged in index order.
///
/// When both kinds share an index, the lower price comes first; on an exact
/// tie (a flat bar) the High comes first.
pub fn find_candidates(high: &[f64], low: &[f64], depth: usize) -> Vec<Pivot> {
    let highs = local_extrema(high, depth, PivotKind::High);
    let lows = local_extrema(low, depth, PivotKind::Low);

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_zigzag_candidates {
        log::info!(
            "ZigZag candidates: {} highs {:?}, {} lows {:?}",
            highs.len(),
            highs.iter().map(|p| p.index).collect::<Vec<_>>(),
            lows.len(),
            lows.iter().map(|p| p.index).collect::<Vec<_>>()
        );
    }

    highs
        .into_iter()
        .merge_by(lows, |h, l| {
            h.index < l.index || (h.index == l.index && h.price <= l.price)
        })
        .collect()
}

/// The last two accepted pivots, held apart from the committed output so
/// that the in-place refinement only ever touches this window.
#[derive(Debug, Default)]
struct SwingWindow {
    committed: Vec<Pivot>,
    second_last: Option<Pivot>,
    last: Option<Pivot>,
}

impl SwingWindow {
    fn accepted(&self) -> usize {
        self.committed.len() + self.second_last.is_some() as usize + self.last.is_some() as usize
    }

    fn push(&mut self, pivot: Pivot) {
        if let Some(oldest) = self.second_last.take() {
            self.committed.push(oldest);
        }
        self.second_last = self.last.replace(pivot);
    }

    fn replace_last(&mut self, pivot: Pivot) {
        self.last = Some(pivot);
    }

    fn finish(mut self) -> Vec<Pivot> {
        self.committed.extend(self.second_last);
        self.committed.extend(self.last);
        self.committed
    }
}

fn is_further_extreme(candidate: &Pivot, last: &Pivot) -> bool {
    match candidate.kind {
        PivotKind::High => candidate.price >= last.price,
        PivotKind::Low => candidate.price <= last.price,
    }
}

/// Stage B: filter candidates into a strictly alternating pivot list.
///
/// `threshold` is a fraction (0.05 = 5%).
pub fn filter_candidates(candidates: &[Pivot], threshold: f64) -> Vec<Pivot> {
    let Some((&seed, rest)) = candidates.split_first() else {
        return Vec::new();
    };

    let mut window = SwingWindow::default();
    window.push(seed);

    for candidate in rest {
        let Some(last) = window.last else { break };

        if candidate.kind != last.kind {
            // A pivot cannot share a bar with the one before it
            if candidate.index == last.index {
                continue;
            }
            if candidate.relative_move_from(&last) >= threshold {
                window.push(*candidate);
            }
        } else if window.accepted() > 2 {
            let Some(second_last) = window.second_last else { continue };
            let move_new = candidate.relative_move_from(&second_last);
            let move_last = last.relative_move_from(&second_last);

            if move_new >= move_last && is_further_extreme(candidate, &last) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_pivot_trace {
                    log::info!(
                        "ZigZag: {} @ {} refined to {:.4} @ {}",
                        last.kind,
                        last.index,
                        candidate.price,
                        candidate.index
                    );
                }
                window.replace_last(*candidate);
            }
        }
    }

    window.finish()
}

/// Depth-window zig-zag detector. The threshold is a percentage.
#[derive(Debug, Clone)]
pub struct ZigZag {
    pub threshold_pct: f64,
    pub depth: usize,
    last: Option<PivotSeries>,
}

impl ZigZag {
    pub fn new(threshold_pct: f64, depth: usize) -> Self {
        Self {
            threshold_pct,
            depth,
            last: None,
        }
    }
}

impl Default for ZigZag {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_THRESHOLD_PCT,
            crate::config::DEFAULT_DEPTH,
        )
    }
}

impl PivotDetector for ZigZag {
    fn name(&self) -> &'static str {
        "ZigZag"
    }

    fn find_pivots(&self, series: &BarSeries) -> AnalysisResult<PivotSeries> {
        let threshold = threshold_fraction(self.threshold_pct)?;
        if self.depth == 0 {
            return Err(ConfigurationError::InvalidDepth(self.depth).into());
        }

        let candidates = find_candidates(series.high(), series.low(), self.depth);
        Ok(PivotSeries::new(filter_candidates(&candidates, threshold)))
    }

    fn last_pivots(&self) -> Option<&PivotSeries> {
        self.last.as_ref()
    }

    fn store_pivots(&mut self, pivots: PivotSeries) -> &PivotSeries {
        self.last.insert(pivots)
    }
}
