use crate::analysis::profile_engine::{ProfileEngine, ProfileParams, assemble_profile, price_grid};
use crate::domain::BarSeries;
use crate::error::AnalysisResult;
use crate::models::{Profile, ProfileKind, WeightAccumulator};

/// Volume-at-price profile.
///
/// Each bar's volume is split evenly over every level its `[low, high]`
/// range touches, so the profile's total weight equals the series volume.
/// A price maps to the highest level at or below it, unlike the digitize
/// rule the TPO counts use.
#[derive(Debug, Clone, Default)]
pub struct VolumeProfile {
    pub params: ProfileParams,
    last: Option<Profile>,
}

impl VolumeProfile {
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

impl ProfileEngine for VolumeProfile {
    fn kind(&self) -> ProfileKind {
        ProfileKind::Volume
    }

    fn compute(&self, series: &BarSeries) -> AnalysisResult<Profile> {
        self.params.validate(series)?;

        let grid = price_grid(series, self.params.bin_count);
        let mut volume_at_price = WeightAccumulator::new(grid);
        for bar in series.bars() {
            volume_at_price.spread(bar.low, bar.high, bar.volume);
        }

        Ok(assemble_profile(
            ProfileKind::Volume,
            volume_at_price,
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
