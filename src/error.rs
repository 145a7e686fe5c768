//! Process-level error type.
//!
//! Component errors (`FetchError`, `ParseError`, `DeliveryError`) are typed with
//! `thiserror` close to where they happen. Anything that ends the run is turned
//! into an `AppError`, which carries the process exit code:
//!
//! - `2`: configuration / usage
//! - `3`: malformed cached record
//! - `4`: local I/O

use std::path::Path;

use crate::parse::ParseError;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_MALFORMED_CACHE: u8 = 3;
pub const EXIT_IO: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(EXIT_CONFIG, message)
    }

    pub fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        Self::new(EXIT_IO, format!("{context}: {err}"))
    }

    /// A cached record on disk could not be parsed.
    pub fn malformed_cache(path: &Path, err: ParseError) -> Self {
        Self::new(
            EXIT_MALFORMED_CACHE,
            format!(
                "Cached record '{}' is malformed ({err}); remove or repair it and re-run.",
                path.display()
            ),
        )
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
