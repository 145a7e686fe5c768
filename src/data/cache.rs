//! Per-day raw record cache on local disk.
//!
//! One file per calendar day, `<dir>/<YYYYMMDD>_<file_name>`. Files are written
//! once and never touched again, so a run can be interrupted at any point and
//! the next one picks up where it stopped.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::data::kdca::{DayFetcher, FetchOutcome};
use crate::error::AppError;

pub struct DayCache<F> {
    dir: PathBuf,
    file_name: String,
    fetcher: F,
}

impl<F: DayFetcher> DayCache<F> {
    /// Open the cache, creating its directory if needed.
    pub fn open(dir: impl Into<PathBuf>, file_name: impl Into<String>, fetcher: F) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::io(format!("Failed to create cache dir '{}'", dir.display()), e))?;
        Ok(Self {
            dir,
            file_name: file_name.into(),
            fetcher,
        })
    }

    pub fn path_for(&self, day: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}_{}", day.format("%Y%m%d"), self.file_name))
    }

    /// Guarantee a raw record for `day` is on disk.
    ///
    /// Returns `Ok(false)` when the source has nothing usable for the day.
    /// Only local write failures are errors.
    pub fn ensure(&self, day: NaiveDate) -> Result<bool, AppError> {
        let path = self.path_for(day);
        if path.is_file() {
            tracing::info!(path = %path.display(), "cached record exists");
            return Ok(true);
        }

        match self.fetcher.fetch(day) {
            FetchOutcome::Present(body) => {
                write_atomically(&path, &body)?;
                tracing::info!(path = %path.display(), bytes = body.len(), "record saved");
                Ok(true)
            }
            FetchOutcome::Absent(reason) => {
                tracing::warn!(%day, %reason, "no record for day");
                Ok(false)
            }
            FetchOutcome::Failed(err) => {
                tracing::warn!(%day, error = %err, "fetch failed; day skipped");
                Ok(false)
            }
        }
    }
}

/// Write to a sibling temp file, then rename it onto `path`.
fn write_atomically(path: &Path, data: &[u8]) -> Result<(), AppError> {
    let tmp = temp_path(path);
    let result = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));

    result.map_err(|e| {
        let _ = fs::remove_file(&tmp);
        AppError::io(format!("Failed to save record '{}'", path.display()), e)
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.part"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::kdca::{AbsentReason, FetchError};
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Fetcher that serves fixed outcomes and records every request.
    struct ScriptedFetcher {
        calls: RefCell<Vec<NaiveDate>>,
        present: Vec<NaiveDate>,
        failing: Vec<NaiveDate>,
    }

    impl ScriptedFetcher {
        fn new(present: Vec<NaiveDate>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                present,
                failing: Vec::new(),
            }
        }
    }

    impl DayFetcher for ScriptedFetcher {
        fn fetch(&self, day: NaiveDate) -> FetchOutcome {
            self.calls.borrow_mut().push(day);
            if self.failing.contains(&day) {
                FetchOutcome::Failed(FetchError::Payload("broken".into()))
            } else if self.present.contains(&day) {
                FetchOutcome::Present(format!("<record day=\"{day}\"/>").into_bytes())
            } else {
                FetchOutcome::Absent(AbsentReason::NoItems)
            }
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, day).unwrap()
    }

    #[test]
    fn fetches_and_saves_missing_day() {
        let temp = TempDir::new().unwrap();
        let fetcher = ScriptedFetcher::new(vec![d(10)]);
        let cache = DayCache::open(temp.path().join("download"), "covid19.xml", &fetcher).unwrap();

        assert!(cache.ensure(d(10)).unwrap());

        let path = temp.path().join("download").join("20230310_covid19.xml");
        assert_eq!(cache.path_for(d(10)), path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<record day=\"2023-03-10\"/>");
        assert_eq!(fetcher.calls.borrow().len(), 1);
    }

    #[test]
    fn existing_file_is_not_refetched_or_modified() {
        let temp = TempDir::new().unwrap();
        let fetcher = ScriptedFetcher::new(vec![d(10)]);
        let cache = DayCache::open(temp.path(), "covid19.xml", &fetcher).unwrap();
        fs::write(cache.path_for(d(10)), "kept as is").unwrap();

        assert!(cache.ensure(d(10)).unwrap());
        assert!(cache.ensure(d(10)).unwrap());

        assert!(fetcher.calls.borrow().is_empty());
        assert_eq!(fs::read_to_string(cache.path_for(d(10))).unwrap(), "kept as is");
    }

    #[test]
    fn absent_day_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let fetcher = ScriptedFetcher::new(vec![]);
        let cache = DayCache::open(temp.path(), "covid19.xml", &fetcher).unwrap();

        assert!(!cache.ensure(d(11)).unwrap());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_fetch_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let mut fetcher = ScriptedFetcher::new(vec![d(12)]);
        fetcher.failing.push(d(12));
        let cache = DayCache::open(temp.path(), "covid19.xml", &fetcher).unwrap();

        assert!(!cache.ensure(d(12)).unwrap());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn absent_day_is_retried_on_next_call() {
        let temp = TempDir::new().unwrap();
        let fetcher = ScriptedFetcher::new(vec![]);
        let cache = DayCache::open(temp.path(), "covid19.xml", &fetcher).unwrap();

        assert!(!cache.ensure(d(11)).unwrap());
        assert!(!cache.ensure(d(11)).unwrap());
        assert_eq!(fetcher.calls.borrow().len(), 2);
    }

    #[test]
    fn write_failure_is_an_error_and_cleans_up() {
        let temp = TempDir::new().unwrap();
        let fetcher = ScriptedFetcher::new(vec![d(10)]);
        let cache = DayCache::open(temp.path(), "covid19.xml", &fetcher).unwrap();
        // A directory squatting on the final name makes the rename fail.
        fs::create_dir(cache.path_for(d(10))).unwrap();
        let err = write_atomically(&cache.path_for(d(10)), b"data").unwrap_err();

        assert_eq!(err.exit_code(), crate::error::EXIT_IO);
        assert!(!temp_path(&cache.path_for(d(10))).exists());
    }
}
