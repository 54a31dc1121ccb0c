//! Configuration module for the pivot-profile crate.

pub mod analysis;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, DEFAULT_BIN_COUNT, DEFAULT_DEPTH, DEFAULT_THRESHOLD_PCT, DEFAULT_VALUE_AREA_PCT,
};
pub use persistence::{DATA_PATH, PERSISTENCE, data_csv_path};
