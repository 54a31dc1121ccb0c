use argminmax::ArgMinMax;
use std::ops::RangeInclusive;

/// Decimal places used when reporting price levels.
pub const PRICE_DISPLAY_DECIMALS: i32 = 2;

/// `bin_count` equally spaced level marks covering `[price_min, price_max]`,
/// both ends included.
///
/// Two ways to map a price onto the marks:
/// - `bucket_of` is the right-open digitize rule used for TPO counts: the
///   number of marks at or below the price. `[mark[i-1], mark[i])` is bucket
///   `i`, anything at or above the top mark is bucket `n_levels`, and bucket 0
///   is only reachable from below the range.
/// - `level_index` floors to the highest mark at or below the price, clamped
///   into the grid, so a price always lands on a level it actually reached.
///
/// A zero-width range collapses to a single mark, and every price maps to
/// bucket 0.
#[derive(serde::Deserialize, serde::Serialize, Default, Debug, Clone, PartialEq)]
pub struct PriceGrid {
    pub price_min: f64,
    pub price_max: f64,
    levels: Vec<f64>,
}

impl PriceGrid {
    pub fn new(price_min: f64, price_max: f64, bin_count: usize) -> Self {
        debug_assert!(price_min <= price_max);
        if price_min == price_max || bin_count < 2 {
            return Self {
                price_min,
                price_max,
                levels: vec![price_min],
            };
        }

        let step = (price_max - price_min) / (bin_count - 1) as f64;
        let mut levels: Vec<f64> = (0..bin_count)
            .map(|i| price_min + i as f64 * step)
            .collect();
        // Pin the top mark so accumulated error never leaves it short of the max.
        if let Some(last) = levels.last_mut() {
            *last = price_max;
        }

        Self {
            price_min,
            price_max,
            levels,
        }
    }

    #[inline]
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn is_collapsed(&self) -> bool {
        self.levels.len() == 1
    }

    /// Distance between neighbouring marks (0 for a collapsed grid)
    pub fn step(&self) -> f64 {
        if self.is_collapsed() {
            0.0
        } else {
            (self.price_max - self.price_min) / (self.levels.len() - 1) as f64
        }
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Marks rounded for display; bucket assignment never uses these.
    pub fn rounded_levels(&self) -> Vec<f64> {
        self.levels
            .iter()
            .map(|&level| round_to(level, PRICE_DISPLAY_DECIMALS))
            .collect()
    }

    /// Digitize bucket of `price`. May equal `n_levels()` for prices at or
    /// above the top mark.
    pub fn bucket_of(&self, price: f64) -> usize {
        if self.is_collapsed() {
            return 0;
        }
        self.levels.partition_point(|&level| level <= price)
    }

    /// Index of the highest mark at or below `price`.
    pub fn level_index(&self, price: f64) -> usize {
        // Clamping handles prices just outside the grid and the top mark.
        self.bucket_of(price)
            .saturating_sub(1)
            .min(self.n_levels() - 1)
    }

    /// Levels spanned by `[low, high]`, by `level_index` on both ends.
    pub fn touched_buckets(&self, mut low: f64, mut high: f64) -> RangeInclusive<usize> {
        // Swap the values over if necessary
        if high < low {
            (low, high) = (high, low);
        }
        self.level_index(low)..=self.level_index(high)
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}
