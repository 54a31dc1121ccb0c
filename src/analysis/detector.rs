use crate::domain::{BarSeries, PivotSeries};
use crate::error::{AnalysisResult, ConfigurationError};

/// Shared capability of the pivot detectors.
///
/// `find_pivots` is pure. `fit` runs it and, only on success, keeps the
/// result for later inspection through `last_pivots`.
pub trait PivotDetector {
    fn name(&self) -> &'static str;

    fn find_pivots(&self, series: &BarSeries) -> AnalysisResult<PivotSeries>;

    fn last_pivots(&self) -> Option<&PivotSeries>;

    fn store_pivots(&mut self, pivots: PivotSeries) -> &PivotSeries;

    fn fit(&mut self, series: &BarSeries) -> AnalysisResult<&PivotSeries> {
        let pivots = self.find_pivots(series)?;
        log::debug!(
            "{}: {} pivots over {} bars",
            self.name(),
            pivots.len(),
            series.len()
        );
        Ok(self.store_pivots(pivots))
    }
}

/// Check a percentage threshold and turn it into a fraction.
pub fn threshold_fraction(threshold_pct: f64) -> Result<f64, ConfigurationError> {
    if !threshold_pct.is_finite() || threshold_pct < 0.0 {
        return Err(ConfigurationError::InvalidThreshold(threshold_pct));
    }
    if threshold_pct == 0.0 {
        log::warn!("Threshold is 0%: every directional tick will confirm a pivot");
    }
    Ok(threshold_pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_converted_from_percent() {
        assert_eq!(threshold_fraction(5.0), Ok(0.05));
        assert_eq!(threshold_fraction(0.0), Ok(0.0));
    }

    #[test]
    fn negative_or_nan_threshold_is_rejected() {
        assert_eq!(
            threshold_fraction(-1.0),
            Err(ConfigurationError::InvalidThreshold(-1.0))
        );
        assert!(threshold_fraction(f64::NAN).is_err());
        assert!(threshold_fraction(f64::INFINITY).is_err());
    }
}
