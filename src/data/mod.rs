// Loading and saving bar data
pub mod csv_source;

// Re-export commonly used types
pub use csv_source::{load_bar_series, write_bar_series};
