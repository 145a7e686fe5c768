//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - subjects and per-day parsed entries (`Subject`, `ParsedEntry`, `Count`)
//! - cache references (`CachedDay`, `DayRecords`)
//! - aggregated outputs (`TimeSeries`, `SnapshotSummary`, `Digest`)

pub mod types;

pub use types::*;
