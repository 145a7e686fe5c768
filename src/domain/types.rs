//! Shared domain types.
//!
//! Everything here is plain data: the pipeline stages pass these values along
//! and the reporting side only reads them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::parse::format_grouped;

/// English subject name the API uses for the nationwide aggregate.
pub const TOTAL_SUBJECT: &str = "Total";

/// A named entity within one day's record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    /// Nationwide aggregate.
    Total,
    /// A region, keyed by its English name (e.g. `Incheon`).
    Region(String),
}

impl Subject {
    /// Map an English subject name from the feed onto a `Subject`.
    pub fn from_english(name: &str) -> Self {
        if name == TOTAL_SUBJECT {
            Subject::Total
        } else {
            Subject::Region(name.to_string())
        }
    }
}

/// An integer count as published by the feed.
///
/// `Display` renders the comma-grouped form used in every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Count(pub i64);

impl Count {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_grouped(self.0))
    }
}

/// One subject's values for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub subject: Subject,
    /// Subject name in the feed's local language (`gubun`).
    pub local_name: Option<String>,
    /// New cases reported on `record_date`.
    pub new_cases: Count,
    pub cumulative: Option<Count>,
    pub domestic: Option<Count>,
    pub imported: Option<Count>,
    pub deaths: Option<Count>,
    pub record_date: NaiveDate,
}

/// A day whose raw record is present in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDay {
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// Parsed entries of one cached day, in cache order.
#[derive(Debug, Clone)]
pub struct DayRecords {
    pub day: CachedDay,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub new_cases: i64,
}

/// Daily new cases over the window, one point per distinct adjacent date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeries {
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `MM/DD` labels for chart axes.
    pub fn labels(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.date.format("%m/%d").to_string())
            .collect()
    }

    pub fn values(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.new_cases).collect()
    }
}

/// A named metric of the same-day summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Cumulative,
    NewCases,
    Domestic,
    Imported,
    Deaths,
    RegionNewCases(String),
}

/// Metrics valid for the current day only.
///
/// A missing key means the value was not found for today; it is never
/// substituted with zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotSummary {
    values: BTreeMap<Metric, String>,
}

impl SnapshotSummary {
    pub fn insert(&mut self, metric: Metric, value: impl fmt::Display) {
        self.values.insert(metric, value.to_string());
    }

    pub fn get(&self, metric: &Metric) -> Option<&str> {
        self.values.get(metric).map(String::as_str)
    }

    pub fn contains(&self, metric: &Metric) -> bool {
        self.values.contains_key(metric)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Metric, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }
}

/// Output of one sync: the series, today's summary and the files it came from.
#[derive(Debug, Clone)]
pub struct Digest {
    pub today: NaiveDate,
    pub series: TimeSeries,
    pub summary: SnapshotSummary,
    pub files: Vec<CachedDay>,
    /// English region name -> name in the feed's language (`gubun`).
    pub region_names: BTreeMap<String, String>,
}

impl Digest {
    /// Whether today's raw record is among the synced files.
    ///
    /// The record may still lack entries dated today; those metrics stay absent.
    pub fn has_today_file(&self) -> bool {
        self.files.iter().any(|f| f.date == self.today)
    }
}
