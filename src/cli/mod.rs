//! Command-line parsing for the daily COVID-19 digest.
//!
//! Argument parsing and command dispatch stay separate from the pipeline code.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "c19", version, about = "Daily KDCA COVID-19 statistics sync and digest")]
pub struct Cli {
    /// Verbose logging (overrides RUST_LOG).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sync the window and post today's digest (once per day).
    Run(RunArgs),
    /// Sync the window and print the digest; no marker, no notification.
    Show(ShowArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Day to treat as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Print the digest instead of posting it; the day is not marked done.
    #[arg(long)]
    pub no_notify: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Day to treat as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,
}
