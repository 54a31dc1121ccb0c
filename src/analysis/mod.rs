// Pivot detectors
pub mod detector;
pub mod directional_change;
pub mod zigzag;

// Price profiles
pub mod market_profile;
pub mod profile_engine;
pub mod value_area;
pub mod volume_profile;

pub mod batch;

// Re-export commonly used types
pub use batch::{AnalysisOutput, AnalysisReport, AnalysisRequest, analyze_all};
pub use detector::PivotDetector;
pub use directional_change::DirectionalChange;
pub use market_profile::MarketProfile;
pub use profile_engine::{ProfileEngine, ProfileParams};
pub use volume_profile::VolumeProfile;
pub use zigzag::ZigZag;
