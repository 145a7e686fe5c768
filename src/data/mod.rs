//! Remote source, local cache and window planning.
//!
//! - KDCA client + fetch outcomes (`kdca`)
//! - per-day raw record cache (`cache`)
//! - trailing window coverage (`window`)
//! - once-per-day result marker (`gate`)

pub mod cache;
pub mod gate;
pub mod kdca;
pub mod window;

pub use cache::DayCache;
pub use gate::ResultGate;
pub use kdca::{AbsentReason, DayFetcher, FetchError, FetchOutcome, KdcaClient};
pub use window::{DateWindow, plan_window};
