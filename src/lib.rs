//! `c19-digest` library crate.
//!
//! The binary (`c19`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes or hitting the network
//! - the cache, parser and aggregator are reusable on their own

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod notify;
pub mod parse;
pub mod plot;
pub mod report;
