use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

use crate::analysis::detector::PivotDetector;
use crate::analysis::directional_change::DirectionalChange;
use crate::analysis::market_profile::MarketProfile;
use crate::analysis::profile_engine::{ProfileEngine, ProfileParams};
use crate::analysis::volume_profile::VolumeProfile;
use crate::analysis::zigzag::ZigZag;
use crate::domain::{BarSeries, LabeledPivot};
use crate::error::AnalysisResult;
use crate::models::Profile;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// One analysis, fully parameterized, ready to run against any series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisRequest {
    DirectionalChange { threshold_pct: f64 },
    ZigZag { threshold_pct: f64, depth: usize },
    MarketProfile(ProfileParams),
    VolumeProfile(ProfileParams),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOutput {
    Pivots(Vec<LabeledPivot>),
    Profile(Profile),
}

/// Result of one request against one named series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub name: String,
    pub bars: usize,
    pub output: AnalysisOutput,
}

impl AnalysisRequest {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisRequest::DirectionalChange { .. } => "DirectionalChange",
            AnalysisRequest::ZigZag { .. } => "ZigZag",
            AnalysisRequest::MarketProfile(_) => "MarketProfile",
            AnalysisRequest::VolumeProfile(_) => "VolumeProfile",
        }
    }

    pub fn run(&self, series: &BarSeries) -> AnalysisResult<AnalysisOutput> {
        let output = match *self {
            AnalysisRequest::DirectionalChange { threshold_pct } => {
                let pivots = DirectionalChange::new(threshold_pct).find_pivots(series)?;
                AnalysisOutput::Pivots(pivots.labeled(series))
            }
            AnalysisRequest::ZigZag {
                threshold_pct,
                depth,
            } => {
                let pivots = ZigZag::new(threshold_pct, depth).find_pivots(series)?;
                AnalysisOutput::Pivots(pivots.labeled(series))
            }
            AnalysisRequest::MarketProfile(params) => AnalysisOutput::Profile(
                MarketProfile::new(params.bin_count, params.value_area_pct).compute(series)?,
            ),
            AnalysisRequest::VolumeProfile(params) => AnalysisOutput::Profile(
                VolumeProfile::new(params.bin_count, params.value_area_pct).compute(series)?,
            ),
        };
        Ok(output)
    }
}

/// Run `request` over every named series in parallel. Results come back in
/// input order, one per series, so a failure on one never hides the others.
pub fn analyze_all(
    named_series: &[(String, BarSeries)],
    request: &AnalysisRequest,
) -> Vec<AnalysisResult<AnalysisReport>> {
    let start = Instant::now();

    let reports: Vec<AnalysisResult<AnalysisReport>> = named_series
        .par_iter()
        .map(|(name, series)| {
            let output = request.run(series)?;
            Ok(AnalysisReport {
                name: name.clone(),
                bars: series.len(),
                output,
            })
        })
        .collect();

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_batch_timings {
        log::info!(
            "{} over {} series took {:?}",
            request.label(),
            named_series.len(),
            start.elapsed()
        );
    }
    log::debug!(
        "Batch {}: {} of {} succeeded in {} ms",
        request.label(),
        reports.iter().filter(|r| r.is_ok()).count(),
        reports.len(),
        start.elapsed().as_millis()
    );

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalysisError, ConfigurationError};

    fn named(name: &str, closes: &[f64]) -> (String, BarSeries) {
        (name.to_string(), BarSeries::from_closes(closes).unwrap())
    }

    #[test]
    fn results_keep_input_order_and_isolate_failures() {
        let inputs = vec![
            named("a", &[100.0, 103.0, 97.0, 110.0, 100.0]),
            ("empty".to_string(), BarSeries::default()),
            named("c", &[10.0, 11.0, 12.0]),
        ];
        let request = AnalysisRequest::VolumeProfile(ProfileParams {
            bin_count: 4,
            value_area_pct: 70,
        });

        let reports = analyze_all(&inputs, &request);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].as_ref().unwrap().name, "a");
        assert_eq!(
            reports[1],
            Err(AnalysisError::Configuration(ConfigurationError::EmptySeries))
        );
        assert_eq!(reports[2].as_ref().unwrap().name, "c");
        assert_eq!(reports[2].as_ref().unwrap().bars, 3);
    }

    #[test]
    fn pivot_requests_report_timestamps() {
        let inputs = vec![named("dc", &[100.0, 103.0, 97.0, 110.0, 100.0])];
        let request = AnalysisRequest::DirectionalChange { threshold_pct: 5.0 };
        let reports = analyze_all(&inputs, &request);

        let Ok(AnalysisReport {
            output: AnalysisOutput::Pivots(pivots),
            ..
        }) = &reports[0]
        else {
            panic!("expected pivots, got {:?}", reports[0]);
        };
        let stamps: Vec<i64> = pivots.iter().map(|p| p.timestamp_ms).collect();
        assert_eq!(stamps, vec![1, 2, 3]);
    }

    #[test]
    fn request_run_matches_detector_directly() {
        let series = BarSeries::from_closes(&[5.0, 6.0, 4.0, 7.0, 3.0, 8.0]).unwrap();
        let request = AnalysisRequest::ZigZag {
            threshold_pct: 1.0,
            depth: 1,
        };
        let direct = ZigZag::new(1.0, 1).find_pivots(&series).unwrap();
        assert_eq!(
            request.run(&series).unwrap(),
            AnalysisOutput::Pivots(direct.labeled(&series))
        );
    }
}
