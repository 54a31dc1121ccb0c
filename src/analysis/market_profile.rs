//! Market Profile: time-at-price as TPO counts.
//!
//! There is no sub-bar time series, so each bar's range stands in for dwell
//! time: the bar is sampled from its low upward in steps of the global bin
//! step, and every sample that lands inside the grid adds one TPO. How well
//! this tracks real time-at-price depends on bar granularity against the
//! bin count.

use crate::analysis::profile_engine::{ProfileEngine, ProfileParams, assemble_profile, price_grid};
use crate::domain::BarSeries;
use crate::error::AnalysisResult;
use crate::models::{Profile, ProfileKind, WeightAccumulator};

/// Sample prices `low, low + step, ...` strictly below `high`.
///
/// A bar narrower than one step, a flat bar, or a collapsed grid (`step == 0`)
/// still yields its low.
pub fn tpo_samples(low: f64, high: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && high > low {
        (((high - low) / step).ceil() as usize).max(1)
    } else {
        1
    };
    (0..count).map(move |k| low + k as f64 * step)
}

#[derive(Debug, Clone, Default)]
pub struct MarketProfile {
    pub params: ProfileParams,
    last: Option<Profile>,
}

impl MarketProfile {
    pub fn new(bin_count: usize, value_area_pct: u32) -> Self {
        Self {
            params: ProfileParams {
                bin_count,
                value_area_pct,
            },
            last: None,
        }
    }
}

impl ProfileEngine for MarketProfile {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Market
    }

    fn compute(&self, series: &BarSeries) -> AnalysisResult<Profile> {
        self.params.validate(series)?;

        let grid = price_grid(series, self.params.bin_count);
        let step = grid.step();
        let mut tpo_counts = WeightAccumulator::new(grid);

        let mut dropped = 0usize;
        for bar in series.bars() {
            for sample in tpo_samples(bar.low, bar.high, step) {
                if !tpo_counts.add_at(sample, 1.0) {
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            log::debug!("Market profile: {} samples fell outside the grid", dropped);
        }

        Ok(assemble_profile(
            ProfileKind::Market,
            tpo_counts,
            self.params.value_area_pct,
        ))
    }

    fn last_profile(&self) -> Option<&Profile> {
        self.last.as_ref()
    }

    fn store_profile(&mut self, profile: Profile) -> &Profile {
        self.last.insert(profile)
    }
}
