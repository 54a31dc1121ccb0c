// Result models produced by the profile engines
// These types are pure data, independent of how they are printed

pub mod profile;

// Re-export key types for convenience
pub use profile::{PointOfControl, PriceBin, Profile, ProfileKind, ValueArea, WeightAccumulator};
