//! Terminal output for a digest.
//!
//! Formatting lives here so the aggregation code stays free of presentation
//! details and output changes stay localized.

use crate::domain::{Digest, Metric};
use crate::parse::format_grouped;

/// English label for a summary metric.
pub fn metric_label(metric: &Metric) -> String {
    match metric {
        Metric::Cumulative => "Confirmed (cumulative)".to_string(),
        Metric::NewCases => "New cases".to_string(),
        Metric::Domestic => "Domestic".to_string(),
        Metric::Imported => "Imported".to_string(),
        Metric::Deaths => "Deaths".to_string(),
        Metric::RegionNewCases(name) => format!("New cases ({name})"),
    }
}

/// Format the run summary: coverage, today's metrics and the daily series.
pub fn format_digest(digest: &Digest) -> String {
    let mut out = String::new();

    out.push_str("=== c19 - COVID-19 daily digest ===\n");
    out.push_str(&format!("Today: {}\n", digest.today));
    match (digest.files.first(), digest.files.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Cached days: {} ({} .. {})\n",
            digest.files.len(),
            first.date,
            last.date
        )),
        _ => out.push_str("Cached days: 0\n"),
    }

    out.push_str("\nToday's figures:\n");
    if digest.summary.is_empty() {
        out.push_str("  (no record for today yet)\n");
    }
    for (metric, value) in digest.summary.iter() {
        out.push_str(&format!("  {:<28} {:>14}\n", metric_label(metric), value));
    }

    out.push_str("\nDaily new cases:\n");
    out.push_str(&format!("  {:<12} {:>12}\n", "date", "new_cases"));
    out.push_str(&format!("  {:-<12} {:-<12}\n", "", ""));
    for p in &digest.series.points {
        out.push_str(&format!("  {:<12} {:>12}\n", p.date, format_grouped(p.new_cases)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::{CachedDay, Count, SeriesPoint, SnapshotSummary, TimeSeries};
    use std::path::PathBuf;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, day).unwrap()
    }

    #[test]
    fn digest_lists_metrics_and_series() {
        let mut summary = SnapshotSummary::default();
        summary.insert(Metric::NewCases, Count(10_335));
        summary.insert(Metric::RegionNewCases("Incheon".into()), Count(632));

        let digest = Digest {
            today: d(10),
            series: TimeSeries {
                points: vec![
                    SeriesPoint { date: d(9), new_cases: 12_345 },
                    SeriesPoint { date: d(10), new_cases: 10_335 },
                ],
            },
            summary,
            files: vec![
                CachedDay { date: d(9), path: PathBuf::from("a") },
                CachedDay { date: d(10), path: PathBuf::from("b") },
            ],
            region_names: Default::default(),
        };

        let text = format_digest(&digest);
        assert!(text.contains("Cached days: 2 (2023-03-09 .. 2023-03-10)"));
        assert!(text.contains("New cases (Incheon)"));
        assert!(text.contains("10,335"));
        assert!(text.contains("12,345"));
        assert!(!text.contains("no record for today"));
    }

    #[test]
    fn empty_summary_says_so() {
        let digest = Digest {
            today: d(10),
            series: TimeSeries::default(),
            summary: SnapshotSummary::default(),
            files: vec![],
            region_names: Default::default(),
        };
        let text = format_digest(&digest);
        assert!(text.contains("Cached days: 0"));
        assert!(text.contains("(no record for today yet)"));
    }
}
