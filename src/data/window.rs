//! Trailing date window and coverage planning.

use chrono::{Days, NaiveDate};

use crate::data::cache::DayCache;
use crate::data::kdca::DayFetcher;
use crate::domain::CachedDay;
use crate::error::AppError;

/// `[today - (len - 1), today]`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window of `len` days ending on `today`. `len` is at least 1.
    pub fn trailing(today: NaiveDate, len: u32) -> Self {
        let back = u64::from(len.max(1) - 1);
        let start = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// Days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }
}

/// Ensure every day of the window is cached and return the ones that are.
///
/// Days the source has nothing for are left out; the result keeps ascending
/// date order.
pub fn plan_window<F: DayFetcher>(
    cache: &DayCache<F>,
    window: DateWindow,
) -> Result<Vec<CachedDay>, AppError> {
    let mut present = Vec::with_capacity(window.day_count());
    for day in window.days() {
        if cache.ensure(day)? {
            present.push(CachedDay {
                date: day,
                path: cache.path_for(day),
            });
        }
    }

    tracing::info!(
        start = %window.start,
        end = %window.end,
        cached = present.len(),
        window = window.day_count(),
        "window coverage"
    );
    Ok(present)
}
