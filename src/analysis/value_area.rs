//! Point of Control and Value Area over a price-descending bin list.
//!
//! The value area here is the literal sweep: bins are taken in
//! weight-descending order (a stable sort, so ties keep their
//! price-descending order) until the running total is strictly greater than
//! the target, and the area spans the lowest to highest price swept. It is
//! not the classical contiguous expansion outward from the POC, and the swept
//! bins need not be adjacent.
//!
//! Only the stable order is reproducible. An unstable sort (pandas' default
//! quicksort, `sort_unstable_by`) may visit tied bins in another order once a
//! profile has more than a handful of them, which can move the value-area
//! edges.

use itertools::Itertools;

use crate::models::{PointOfControl, PriceBin, ValueArea};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Highest-weight bin; the first one in stored order wins a tie.
pub fn point_of_control(bins: &[PriceBin]) -> Option<PointOfControl> {
    let mut best: Option<PointOfControl> = None;
    for (bin_index, bin) in bins.iter().enumerate() {
        if best.is_none_or(|poc| bin.weight > poc.weight) {
            best = Some(PointOfControl {
                bin_index,
                price_level: bin.price_level,
                weight: bin.weight,
            });
        }
    }
    best
}

/// Bins in the order the value-area sweep visits them, with the number of
/// bins the sweep takes.
pub fn value_area_sweep(bins: &[PriceBin], value_area_pct: u32) -> (Vec<PriceBin>, usize) {
    let total: f64 = bins.iter().map(|b| b.weight).sum();
    let target = total * f64::from(value_area_pct) / 100.0;

    let ordered: Vec<PriceBin> = bins
        .iter()
        .copied()
        .sorted_by(|a, b| b.weight.total_cmp(&a.weight))
        .collect();

    let mut cumulative = 0.0;
    let mut taken = 0;
    for bin in &ordered {
        taken += 1;
        cumulative += bin.weight;
        if cumulative > target {
            break;
        }
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_value_area_sweep {
        log::info!(
            "Value area sweep: {} of {} bins, {:.4} of {:.4} (target {:.4})",
            taken,
            ordered.len(),
            cumulative,
            total,
            target
        );
    }

    (ordered, taken)
}

/// Price span of the bins swept until their weight exceeds
/// `value_area_pct` percent of the total.
pub fn value_area(bins: &[PriceBin], value_area_pct: u32) -> Option<ValueArea> {
    let (ordered, taken) = value_area_sweep(bins, value_area_pct);
    let (low, high) = ordered[..taken]
        .iter()
        .map(|b| b.price_level)
        .minmax()
        .into_option()?;
    Some(ValueArea {
        low_price: low,
        high_price: high,
    })
}
