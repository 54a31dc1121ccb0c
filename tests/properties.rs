//! Property-based checks for the pivot detectors and profile engines
//!
//! Invariants covered:
//! 1. Pivots alternate in kind and their indices strictly increase (both detectors)
//! 2. Every DirectionalChange pivot is confirmed by the first later close past the threshold
//! 3. VolumeProfile conserves total volume
//! 4. The POC carries the maximum bin weight
//! 5. The value-area sweep takes the shortest prefix exceeding the target
//! 6. Repeated runs give identical results

use proptest::prelude::*;

use pivot_profile::analysis::directional_change::trace_directional_pivots;
use pivot_profile::analysis::value_area::value_area_sweep;
use pivot_profile::{
    Bar, BarSeries, DirectionalChange, MarketProfile, PivotDetector, PivotKind, ProfileEngine,
    VolumeProfile, ZigZag,
};

// ============================================================================
// Strategies
// ============================================================================

/// Random walk of hourly bars starting at 100, with wicks of up to 2% on
/// both sides.
fn bar_series(max_bars: usize) -> impl Strategy<Value = BarSeries> {
    prop::collection::vec(
        (-0.03f64..0.03, 0.0f64..0.02, 0.0f64..0.02, 0.0f64..5_000.0),
        0..max_bars,
    )
    .prop_map(|steps| {
        let mut close = 100.0;
        let bars: Vec<Bar> = steps
            .into_iter()
            .enumerate()
            .map(|(i, (ret, up, down, volume))| {
                let open = close;
                close *= 1.0 + ret;
                Bar::new(
                    i as i64 * 3_600_000,
                    open,
                    open.max(close) * (1.0 + up),
                    open.min(close) * (1.0 - down),
                    close,
                    volume,
                )
            })
            .collect();
        BarSeries::from_bars(&bars).unwrap()
    })
}

fn non_empty_series() -> impl Strategy<Value = BarSeries> {
    bar_series(120).prop_filter("needs at least one bar", |s| !s.is_empty())
}

// ============================================================================
// Pivot detectors
// ============================================================================

proptest! {
    #[test]
    fn directional_change_pivots_alternate_in_order(
        series in bar_series(150),
        threshold_pct in 0.5f64..15.0,
    ) {
        let pivots = DirectionalChange::new(threshold_pct).find_pivots(&series).unwrap();
        prop_assert!(pivots.is_alternating(), "kinds must alternate: {:?}", pivots);
        prop_assert!(pivots.is_index_ordered(), "indices must increase: {:?}", pivots);
    }

    #[test]
    fn directional_change_pivots_are_confirmed_by_first_crossing_close(
        series in bar_series(150),
        threshold_pct in 0.5f64..15.0,
    ) {
        let threshold = threshold_pct / 100.0;
        let close = series.close();
        let trace = trace_directional_pivots(close, series.high(), series.low(), threshold);
        let pivots = DirectionalChange::new(threshold_pct).find_pivots(&series).unwrap();
        prop_assert_eq!(trace.len(), pivots.len());

        for (step, pivot) in trace.iter().zip(pivots.iter()) {
            prop_assert_eq!(&step.pivot, pivot);
            prop_assert!(step.confirmed_at > pivot.index);
            let crosses = |c: f64| match pivot.kind {
                PivotKind::High => c <= pivot.price * (1.0 - threshold),
                PivotKind::Low => c >= pivot.price * (1.0 + threshold),
            };
            prop_assert!(
                crosses(close[step.confirmed_at]),
                "bar {} does not confirm {:?}", step.confirmed_at, pivot
            );
            prop_assert!(
                !close[pivot.index + 1..step.confirmed_at].iter().any(|&c| crosses(c)),
                "{:?} was confirmable before bar {}", pivot, step.confirmed_at
            );
        }
    }

    #[test]
    fn zigzag_pivots_alternate_in_order(
        series in bar_series(150),
        threshold_pct in 0.5f64..15.0,
        depth in 1usize..8,
    ) {
        let pivots = ZigZag::new(threshold_pct, depth).find_pivots(&series).unwrap();
        prop_assert!(pivots.is_alternating(), "kinds must alternate: {:?}", pivots);
        prop_assert!(pivots.is_index_ordered(), "indices must increase: {:?}", pivots);
        for pivot in &pivots {
            prop_assert!(pivot.index < series.len());
        }
    }

    #[test]
    fn detectors_are_idempotent(
        series in bar_series(100),
        threshold_pct in 0.5f64..15.0,
        depth in 1usize..6,
    ) {
        let dc = DirectionalChange::new(threshold_pct);
        prop_assert_eq!(dc.find_pivots(&series).unwrap(), dc.find_pivots(&series).unwrap());

        let mut zz = ZigZag::new(threshold_pct, depth);
        let first = zz.fit(&series).unwrap().clone();
        let second = zz.fit(&series).unwrap().clone();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Profile engines
// ============================================================================

proptest! {
    #[test]
    fn volume_profile_conserves_volume(
        series in non_empty_series(),
        bin_count in 2usize..60,
    ) {
        let profile = VolumeProfile::new(bin_count, 70).compute(&series).unwrap();
        let expected = series.total_volume();
        let summed: f64 = profile.weights().sum();
        prop_assert!(
            (summed - expected).abs() <= 1e-9 * expected.max(1.0),
            "binned {} vs traded {}", summed, expected
        );
    }

    #[test]
    fn poc_carries_the_maximum_weight(
        series in non_empty_series(),
        bin_count in 2usize..60,
        value_area_pct in 0u32..=100,
    ) {
        let engines: [Box<dyn ProfileEngine>; 2] = [
            Box::new(MarketProfile::new(bin_count, value_area_pct)),
            Box::new(VolumeProfile::new(bin_count, value_area_pct)),
        ];
        for engine in &engines {
            let profile = engine.compute(&series).unwrap();
            let poc = profile.point_of_control;
            prop_assert_eq!(poc.weight, profile.max_weight());
            prop_assert_eq!(profile.bins[poc.bin_index].weight, poc.weight);
            prop_assert!(profile.value_area.low_price <= profile.value_area.high_price);
            prop_assert!(profile.value_area.contains(poc.price_level));
        }
    }

    #[test]
    fn value_area_is_the_shortest_exceeding_prefix(
        series in non_empty_series(),
        bin_count in 2usize..60,
        value_area_pct in 0u32..=100,
    ) {
        let profile = VolumeProfile::new(bin_count, value_area_pct).compute(&series).unwrap();
        let total: f64 = profile.weights().sum();
        let target = total * f64::from(value_area_pct) / 100.0;

        let (ordered, taken) = value_area_sweep(&profile.bins, value_area_pct);
        prop_assert!(taken >= 1 && taken <= ordered.len());

        let before: f64 = ordered[..taken - 1].iter().map(|b| b.weight).sum();
        let through: f64 = ordered[..taken].iter().map(|b| b.weight).sum();
        prop_assert!(before <= target, "prefix of {} already exceeded the target", taken - 1);
        if taken < ordered.len() {
            prop_assert!(through > target, "sweep stopped before exceeding the target");
        }
    }

    #[test]
    fn profiles_are_idempotent(
        series in non_empty_series(),
        bin_count in 2usize..40,
    ) {
        let mut engine = MarketProfile::new(bin_count, 70);
        let first = engine.fit(&series).unwrap().clone();
        let second = engine.fit(&series).unwrap().clone();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Fixed scenarios
// ============================================================================

#[test]
fn directional_change_five_bar_scenario() {
    let series = BarSeries::from_closes(&[100.0, 103.0, 97.0, 110.0, 95.0]).unwrap();
    let pivots = DirectionalChange::new(5.0).find_pivots(&series).unwrap();
    let found: Vec<(usize, f64, PivotKind)> =
        pivots.iter().map(|p| (p.index, p.price, p.kind)).collect();
    assert_eq!(
        found,
        vec![
            (1, 103.0, PivotKind::High),
            (2, 97.0, PivotKind::Low),
            (3, 110.0, PivotKind::High)
        ]
    );
}
