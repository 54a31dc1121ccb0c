// General-purpose helpers
pub mod maths_utils;
pub mod time_utils;

pub use time_utils::TimeUtils;
