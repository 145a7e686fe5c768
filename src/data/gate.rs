//! Once-per-day result marker.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::AppError;

const MARKER_CONTENT: &[u8] = b"ok";

pub struct ResultGate {
    marker: PathBuf,
}

impl ResultGate {
    /// Gate for `today`, creating the result directory if needed.
    pub fn open(dir: impl AsRef<Path>, file_name: &str, today: NaiveDate) -> Result<Self, AppError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| AppError::io(format!("Failed to create result dir '{}'", dir.display()), e))?;
        Ok(Self {
            marker: dir.join(format!("{}_{file_name}", today.format("%Y%m%d"))),
        })
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker
    }

    /// `false` when today's run already completed.
    pub fn should_run(&self) -> bool {
        if self.marker.is_file() {
            tracing::info!(marker = %self.marker.display(), "result marker exists; nothing to do today");
            return false;
        }
        true
    }

    /// Record that today's run completed. An existing marker is left as is.
    pub fn mark_done(&self) -> Result<(), AppError> {
        if self.marker.is_file() {
            return Ok(());
        }
        fs::write(&self.marker, MARKER_CONTENT).map_err(|e| {
            AppError::io(format!("Failed to write result marker '{}'", self.marker.display()), e)
        })?;
        tracing::info!(marker = %self.marker.display(), "result marker saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, 10).unwrap()
    }

    #[test]
    fn runs_until_marked() {
        let temp = TempDir::new().unwrap();
        let gate = ResultGate::open(temp.path().join("result"), "result.txt", today()).unwrap();

        assert!(gate.should_run());
        gate.mark_done().unwrap();
        assert!(!gate.should_run());

        let marker = temp.path().join("result").join("20230310_result.txt");
        assert_eq!(gate.marker_path(), marker);
        assert_eq!(fs::read(&marker).unwrap(), b"ok");
    }

    #[test]
    fn mark_done_keeps_existing_marker() {
        let temp = TempDir::new().unwrap();
        let gate = ResultGate::open(temp.path(), "result.txt", today()).unwrap();
        fs::write(gate.marker_path(), "manual").unwrap();

        gate.mark_done().unwrap();
        assert_eq!(fs::read_to_string(gate.marker_path()).unwrap(), "manual");
    }

    #[test]
    fn marker_is_per_day() {
        let temp = TempDir::new().unwrap();
        ResultGate::open(temp.path(), "result.txt", today())
            .unwrap()
            .mark_done()
            .unwrap();

        let tomorrow = today().succ_opt().unwrap();
        let gate = ResultGate::open(temp.path(), "result.txt", tomorrow).unwrap();
        assert!(gate.should_run());
    }
}
