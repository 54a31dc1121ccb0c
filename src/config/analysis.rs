//! Analysis defaults for pivot detection and price profiles

/// Settings shared by the pivot detectors
pub struct PivotSettings {
    // Swing size needed to confirm a reversal, in percent (5.0 = 5%)
    pub threshold_pct: f64,
    // Half-width of the ZigZag local-extremum window, in bars
    pub depth: usize,
}

/// Settings shared by the profile engines
pub struct ProfileSettings {
    // Number of price levels in the profile grid
    pub bin_count: usize,
    // Share of total weight the value area must exceed, in percent
    pub value_area_pct: u32,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub pivots: PivotSettings,
    pub profile: ProfileSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    pivots: PivotSettings {
        threshold_pct: 5.0,
        depth: 10,
    },
    profile: ProfileSettings {
        bin_count: 100,
        value_area_pct: 70,
    },
};

pub const DEFAULT_THRESHOLD_PCT: f64 = ANALYSIS.pivots.threshold_pct;
pub const DEFAULT_DEPTH: usize = ANALYSIS.pivots.depth;
pub const DEFAULT_BIN_COUNT: usize = ANALYSIS.profile.bin_count;
pub const DEFAULT_VALUE_AREA_PCT: u32 = ANALYSIS.profile.value_area_pct;
