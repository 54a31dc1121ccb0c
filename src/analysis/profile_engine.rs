use crate::analysis::value_area::{point_of_control, value_area};
use crate::domain::BarSeries;
use crate::error::{AnalysisResult, ConfigurationError};
use crate::models::{Profile, ProfileKind, WeightAccumulator};
use crate::utils::maths_utils::{PriceGrid, get_max, get_min};

/// Shared capability of the profile engines.
///
/// `compute` is pure. `fit` runs it and, only on success, keeps the result
/// for later inspection through `last_profile`.
pub trait ProfileEngine {
    fn kind(&self) -> ProfileKind;

    fn compute(&self, series: &BarSeries) -> AnalysisResult<Profile>;

    fn last_profile(&self) -> Option<&Profile>;

    fn store_profile(&mut self, profile: Profile) -> &Profile;

    fn fit(&mut self, series: &BarSeries) -> AnalysisResult<&Profile> {
        let profile = self.compute(series)?;
        log::debug!(
            "{}: POC {:.2} (weight {:.4}), value area {:.2}..{:.2} over {} bars",
            self.kind(),
            profile.point_of_control.price_level,
            profile.point_of_control.weight,
            profile.value_area.low_price,
            profile.value_area.high_price,
            series.len()
        );
        Ok(self.store_profile(profile))
    }
}

/// Binning parameters common to both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileParams {
    pub bin_count: usize,
    pub value_area_pct: u32,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            bin_count: crate::config::DEFAULT_BIN_COUNT,
            value_area_pct: crate::config::DEFAULT_VALUE_AREA_PCT,
        }
    }
}

impl ProfileParams {
    /// Reject bad parameters or an empty series before any work happens.
    pub fn validate(&self, series: &BarSeries) -> Result<(), ConfigurationError> {
        if series.is_empty() {
            return Err(ConfigurationError::EmptySeries);
        }
        if self.bin_count < 2 {
            return Err(ConfigurationError::BinCountTooSmall(self.bin_count));
        }
        if self.value_area_pct > 100 {
            return Err(ConfigurationError::InvalidValueAreaPercent(
                self.value_area_pct,
            ));
        }
        Ok(())
    }
}

/// Grid spanning the lowest low to the highest high of a non-empty series.
pub fn price_grid(series: &BarSeries, bin_count: usize) -> PriceGrid {
    let price_min = get_min(series.low());
    let price_max = get_max(series.high());
    let grid = PriceGrid::new(price_min, price_max, bin_count);
    if grid.is_collapsed() {
        log::warn!(
            "Price range is zero-width at {:.4}; profile collapses to a single bin",
            price_min
        );
    }
    grid
}

/// Turn accumulated weights into a price-descending `Profile`.
pub fn assemble_profile(
    kind: ProfileKind,
    accumulator: WeightAccumulator,
    value_area_pct: u32,
) -> Profile {
    let bin_step = accumulator.grid.step();
    let bins = accumulator.into_descending_bins();
    let total_weight = bins.iter().map(|b| b.weight).sum();

    // A grid always has at least one level, so both are present.
    let point_of_control = point_of_control(&bins).unwrap_or_default();
    let value_area = value_area(&bins, value_area_pct).unwrap_or_default();

    Profile {
        kind,
        bins,
        point_of_control,
        value_area,
        bin_step,
        total_weight,
        value_area_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_bad_parameters() {
        let series = BarSeries::from_closes(&[1.0, 2.0]).unwrap();
        let params = ProfileParams {
            bin_count: 1,
            value_area_pct: 70,
        };
        assert_eq!(
            params.validate(&series),
            Err(ConfigurationError::BinCountTooSmall(1))
        );

        let params = ProfileParams {
            bin_count: 10,
            value_area_pct: 101,
        };
        assert_eq!(
            params.validate(&series),
            Err(ConfigurationError::InvalidValueAreaPercent(101))
        );

        assert_eq!(
            ProfileParams::default().validate(&BarSeries::default()),
            Err(ConfigurationError::EmptySeries)
        );
        assert_eq!(ProfileParams::default().validate(&series), Ok(()));
    }

    #[test]
    fn grid_spans_lowest_low_to_highest_high() {
        let bars = [
            crate::domain::Bar::new(0, 101.0, 103.0, 100.0, 102.0, 1.0),
            crate::domain::Bar::new(1, 102.0, 110.0, 101.0, 109.0, 1.0),
        ];
        let series = BarSeries::from_bars(&bars).unwrap();
        let grid = price_grid(&series, 10);
        assert_eq!(grid.price_min, 100.0);
        assert_eq!(grid.price_max, 110.0);
        assert_eq!(grid.n_levels(), 10);
    }
}
