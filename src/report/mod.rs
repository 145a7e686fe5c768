//! Aggregation of parsed days into the time series and today's summary.

pub mod format;

pub use format::*;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DayRecords, Digest, Metric, SeriesPoint, SnapshotSummary, Subject, TimeSeries};

/// Build the series and the same-day summary from parsed days.
///
/// `days` must be in window order (ascending date).
pub fn aggregate(days: &[DayRecords], today: NaiveDate) -> Digest {
    let mut raw_points = Vec::new();
    let mut summary = SnapshotSummary::default();
    let mut region_names = BTreeMap::new();

    for day in days {
        for entry in &day.entries {
            if let (Subject::Region(name), Some(local)) = (&entry.subject, &entry.local_name) {
                region_names.insert(name.clone(), local.clone());
            }
            if entry.subject == Subject::Total {
                raw_points.push(SeriesPoint {
                    date: entry.record_date,
                    new_cases: entry.new_cases.value(),
                });
            }

            if entry.record_date != today {
                continue;
            }
            match &entry.subject {
                Subject::Total => {
                    summary.insert(Metric::NewCases, entry.new_cases);
                    if let Some(v) = entry.cumulative {
                        summary.insert(Metric::Cumulative, v);
                    }
                    if let Some(v) = entry.domestic {
                        summary.insert(Metric::Domestic, v);
                    }
                    if let Some(v) = entry.imported {
                        summary.insert(Metric::Imported, v);
                    }
                    if let Some(v) = entry.deaths {
                        summary.insert(Metric::Deaths, v);
                    }
                }
                Subject::Region(name) => {
                    summary.insert(Metric::RegionNewCases(name.clone()), entry.new_cases);
                }
            }
        }
    }

    Digest {
        today,
        series: TimeSeries {
            points: dedup_consecutive(raw_points),
        },
        summary,
        files: days.iter().map(|d| d.day.clone()).collect(),
        region_names,
    }
}

/// Drop points whose date equals the previously kept point's date.
///
/// Only adjacent repeats collapse; the same date further on is kept.
pub fn dedup_consecutive(points: Vec<SeriesPoint>) -> Vec<SeriesPoint> {
    let mut out: Vec<SeriesPoint> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|last| last.date == p.date) {
            continue;
        }
        out.push(p);
    }
    out
}
