// Domain types and value objects
pub mod bar;
pub mod bar_series;
pub mod pivot;

// Re-export commonly used types
pub use bar::Bar;
pub use bar_series::BarSeries;
pub use pivot::{LabeledPivot, Pivot, PivotKind, PivotSeries};
