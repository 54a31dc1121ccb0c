use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::maths_utils::PriceGrid;

/// Which mass a profile accumulates per price level
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub enum ProfileKind {
    #[default]
    Market, // TPO count (time at price)
    Volume, // Volume at price
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProfileKind::Market => write!(f, "Market Profile (TPO count)"),
            ProfileKind::Volume => write!(f, "Volume Profile (volume at price)"),
        }
    }
}

/// One discretized price level and its accumulated weight.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PriceBin {
    pub price_level: f64,
    pub weight: f64,
}

#[derive(Copy, Clone, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct PointOfControl {
    /// Position within `Profile::bins` (price-descending order)
    pub bin_index: usize,
    pub price_level: f64,
    pub weight: f64,
}

#[derive(Copy, Clone, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct ValueArea {
    pub low_price: f64,
    pub high_price: f64,
}

impl ValueArea {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low_price && price <= self.high_price
    }
}

/// Binned price distribution with its Point of Control and Value Area.
///
/// `bins` are ordered by price level, highest first. The POC index refers to
/// that order.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub kind: ProfileKind,
    pub bins: Vec<PriceBin>,
    pub point_of_control: PointOfControl,
    pub value_area: ValueArea,

    // Metadata
    pub bin_step: f64,
    pub total_weight: f64,
    pub value_area_pct: u32,
}

impl Profile {
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|bin| bin.weight)
    }

    pub fn max_weight(&self) -> f64 {
        self.weights().fold(0.0, f64::max)
    }
}

/// Per-level weight buffer for one `fit` call, indexed in grid (ascending)
/// order.
#[derive(Debug, Clone)]
pub struct WeightAccumulator {
    pub grid: PriceGrid,
    weights: Vec<f64>,
}

impl WeightAccumulator {
    pub fn new(grid: PriceGrid) -> Self {
        let n_levels = grid.n_levels();
        Self {
            grid,
            weights: vec![0.0; n_levels],
        }
    }

    /// Add `weight` to the digitize bucket of `price`. Returns false (and
    /// adds nothing) when the bucket lies outside the grid.
    pub fn add_at(&mut self, price: f64, weight: f64) -> bool {
        let index = self.grid.bucket_of(price);
        match self.weights.get_mut(index) {
            Some(slot) => {
                *slot += weight;
                true
            }
            None => false,
        }
    }

    /// Split `weight` equally across every level `[low, high]` touches, each
    /// end floored to the mark at or below it.
    pub fn spread(&mut self, low: f64, high: f64, weight: f64) {
        let touched = self.grid.touched_buckets(low, high);
        // Density logic: divide the weight by the number of buckets covered
        let per_bucket = weight / touched.clone().count() as f64;
        for slot in &mut self.weights[touched] {
            *slot += per_bucket;
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Pair the rounded level marks with their weights, highest price first.
    pub fn into_descending_bins(self) -> Vec<PriceBin> {
        self.grid
            .rounded_levels()
            .into_iter()
            .zip(self.weights)
            .rev()
            .map(|(price_level, weight)| PriceBin {
                price_level,
                weight,
            })
            .collect()
    }
}
