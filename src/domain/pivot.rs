use serde::{Deserialize, Serialize};

use crate::domain::bar_series::BarSeries;

/// Which side of a swing a pivot marks
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::Display,
)]
pub enum PivotKind {
    High,
    Low,
}

impl PivotKind {
    pub fn opposite(self) -> Self {
        match self {
            PivotKind::High => PivotKind::Low,
            PivotKind::Low => PivotKind::High,
        }
    }
}

/// A confirmed turning point. `index` points into the source `BarSeries`.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Pivot {
    pub index: usize,
    pub price: f64,
    pub kind: PivotKind,
}

impl Pivot {
    pub fn new(index: usize, price: f64, kind: PivotKind) -> Self {
        Self { index, price, kind }
    }

    pub fn high(index: usize, price: f64) -> Self {
        Self::new(index, price, PivotKind::High)
    }

    pub fn low(index: usize, price: f64) -> Self {
        Self::new(index, price, PivotKind::Low)
    }

    /// Relative distance from `other` to this pivot, as a fraction of `other`.
    pub fn relative_move_from(&self, other: &Pivot) -> f64 {
        (self.price - other.price).abs() / other.price
    }
}

/// Pivot resolved against its series' timestamps, for reporting.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LabeledPivot {
    pub timestamp_ms: i64,
    pub price: f64,
    pub kind: PivotKind,
}

/// Ordered turning points produced by a detector.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct PivotSeries {
    pivots: Vec<Pivot>,
}

impl PivotSeries {
    pub fn new(pivots: Vec<Pivot>) -> Self {
        Self { pivots }
    }

    pub fn as_slice(&self) -> &[Pivot] {
        &self.pivots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pivot> {
        self.pivots.iter()
    }

    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    pub fn last(&self) -> Option<&Pivot> {
        self.pivots.last()
    }

    /// True when no two neighbours share a kind.
    pub fn is_alternating(&self) -> bool {
        self.pivots.windows(2).all(|w| w[0].kind != w[1].kind)
    }

    /// True when indices strictly increase.
    pub fn is_index_ordered(&self) -> bool {
        self.pivots.windows(2).all(|w| w[0].index < w[1].index)
    }

    /// Swap each index for the timestamp of the bar it points at.
    pub fn labeled(&self, series: &BarSeries) -> Vec<LabeledPivot> {
        let timestamps = series.timestamps_ms();
        self.pivots
            .iter()
            .map(|p| LabeledPivot {
                timestamp_ms: timestamps[p.index],
                price: p.price,
                kind: p.kind,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a PivotSeries {
    type Item = &'a Pivot;
    type IntoIter = std::slice::Iter<'a, Pivot>;

    fn into_iter(self) -> Self::IntoIter {
        self.pivots.iter()
    }
}
