use serde::{Deserialize, Serialize};

/// One OHLCV observation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    // A constructor for convenience
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Bar {
            timestamp_ms,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar whose open, high, low and close all sit at `price`.
    pub fn flat(timestamp_ms: i64, price: f64, volume: f64) -> Self {
        Self::new(timestamp_ms, price, price, price, price, volume)
    }

    // Distance from low to high
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_bar_has_zero_range() {
        let bar = Bar::flat(0, 101.5, 3.0);
        assert_eq!(bar.range(), 0.0);
        assert_eq!(bar.open, bar.close);

        let bar = Bar::new(1, 10.0, 12.0, 9.0, 11.0, 1.0);
        assert_eq!(bar.range(), 3.0);
    }
}
