//! Plain-text rendering of analysis reports for the terminal.

use std::fmt::Write;

use crate::analysis::{AnalysisOutput, AnalysisReport};
use crate::domain::LabeledPivot;
use crate::models::Profile;
use crate::utils::TimeUtils;
use crate::utils::time_utils::epoch_ms_to_utc;

/// Render one report. `bar_interval_ms` is shown as a shorthand such as
/// `1h` when it matches a standard interval.
pub fn render_text(report: &AnalysisReport, bar_interval_ms: Option<i64>) -> String {
    let mut out = String::new();
    let interval = bar_interval_ms
        .map(TimeUtils::interval_to_string)
        .unwrap_or("unknown");
    let _ = writeln!(out, "== {} ({} bars, {}) ==", report.name, report.bars, interval);

    match &report.output {
        AnalysisOutput::Pivots(pivots) => render_pivots(&mut out, pivots),
        AnalysisOutput::Profile(profile) => render_profile(&mut out, profile),
    }
    out
}

fn render_pivots(out: &mut String, pivots: &[LabeledPivot]) {
    if pivots.is_empty() {
        let _ = writeln!(out, "No pivots");
        return;
    }
    let _ = writeln!(out, "{:<20} {:<5} {:>14}", "Time (UTC)", "Kind", "Price");
    for pivot in pivots {
        let _ = writeln!(
            out,
            "{:<20} {:<5} {:>14.4}",
            epoch_ms_to_utc(pivot.timestamp_ms),
            pivot.kind.to_string(),
            pivot.price
        );
    }
}

fn render_profile(out: &mut String, profile: &Profile) {
    let poc = &profile.point_of_control;
    let va = &profile.value_area;
    let _ = writeln!(out, "{}", profile.kind);
    let _ = writeln!(
        out,
        "POC {:.2} (weight {:.4}) | Value area ({}%) {:.2} - {:.2} | step {:.4}",
        poc.price_level, poc.weight, profile.value_area_pct, va.low_price, va.high_price, profile.bin_step
    );

    let max_weight = profile.max_weight();
    for (i, bin) in profile.bins.iter().enumerate() {
        let bar_len = if max_weight > 0.0 {
            ((bin.weight / max_weight) * 40.0).round() as usize
        } else {
            0
        };
        let marker = if i == poc.bin_index {
            '*'
        } else if va.contains(bin.price_level) {
            '|'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{} {:>12.2} {:>14.4} {}",
            marker,
            bin.price_level,
            bin.weight,
            "#".repeat(bar_len)
        );
    }
}

/// Typical spacing between bars, taken from the first pair.
pub fn bar_interval_ms(timestamps_ms: &[i64]) -> Option<i64> {
    match timestamps_ms {
        [first, second, ..] => Some(second - first),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::profile_engine::ProfileEngine;
    use crate::analysis::volume_profile::VolumeProfile;
    use crate::domain::PivotKind;

    #[test]
    fn pivot_table_lists_each_pivot() {
        let report = AnalysisReport {
            name: "btcusdt1h".to_string(),
            bars: 5,
            output: AnalysisOutput::Pivots(vec![
                LabeledPivot {
                    timestamp_ms: 0,
                    price: 103.0,
                    kind: PivotKind::High,
                },
                LabeledPivot {
                    timestamp_ms: 3_600_000,
                    price: 97.0,
                    kind: PivotKind::Low,
                },
            ]),
        };
        let text = render_text(&report, Some(TimeUtils::MS_IN_H));
        assert!(text.starts_with("== btcusdt1h (5 bars, 1h) =="));
        assert!(text.contains("1970-01-01 00:00:00  High"));
        assert!(text.contains("1970-01-01 01:00:00  Low"));
        assert!(text.contains("97.0000"));
    }

    #[test]
    fn profile_marks_poc_row() {
        let series = crate::domain::BarSeries::from_closes(&[1.0, 2.0, 2.0, 3.0]).unwrap();
        let profile = VolumeProfile::new(3, 70).compute(&series).unwrap();
        let report = AnalysisReport {
            name: "demo".to_string(),
            bars: series.len(),
            output: AnalysisOutput::Profile(profile),
        };
        let text = render_text(&report, None);
        assert!(text.contains("(4 bars, unknown)"));
        assert!(text.contains("Volume Profile"));
        assert_eq!(text.lines().filter(|l| l.starts_with('*')).count(), 1);
    }

    #[test]
    fn interval_from_first_two_bars() {
        assert_eq!(bar_interval_ms(&[0, 60_000, 120_000]), Some(60_000));
        assert_eq!(bar_interval_ms(&[5]), None);
    }
}
