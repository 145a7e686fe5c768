//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads settings
//! - runs the daily pipeline
//! - posts or prints the digest and records the result marker

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Cli, Command, RunArgs, ShowArgs};
use crate::config::Settings;
use crate::data::{KdcaClient, ResultGate};
use crate::domain::Digest;
use crate::error::{AppError, EXIT_IO};
use crate::notify::{QuickChart, SlackNotifier};

pub mod pipeline;

use pipeline::RunOutcome;

/// Entry point for the `c19` binary.
pub fn run() -> Result<(), AppError> {
    // `c19` and `c19 --date ...` behave like `c19 run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_tracing(cli.debug);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Show(args) => handle_show(args),
    }
}

/// Log level: `--debug`, else `RUST_LOG`, else info for this crate.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("c19_digest=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("c19_digest=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let settings = Settings::from_env(!args.no_notify)?;
    let today = args.date.unwrap_or_else(local_today);

    let client = kdca_client(&settings)?;
    let gate = ResultGate::open(&settings.files.dir_result, &settings.files.result_file_name, today)?;

    let digest = match pipeline::run_gated(&settings, client, &gate, today)? {
        RunOutcome::AlreadyDone { marker } => {
            println!("Already completed for {today} ({}).", marker.display());
            return Ok(());
        }
        RunOutcome::TodayNotPublished(digest) => {
            println!("{}", crate::report::format_digest(&digest));
            println!("No statistics published for {today} yet; nothing sent.");
            return Ok(());
        }
        RunOutcome::Ready(digest) => digest,
    };

    hand_off(&settings, &gate, &digest)
}

/// Post the digest and mark the day, or print it as a dry run.
///
/// A dry run (no Slack settings) leaves the marker unset.
fn hand_off(settings: &Settings, gate: &ResultGate, digest: &Digest) -> Result<(), AppError> {
    let Some(slack) = &settings.slack else {
        print_digest(digest, 60, 12);
        println!("Dry run; result marker not written.");
        return Ok(());
    };

    let notifier = SlackNotifier::new(slack)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to set up Slack client: {e}")))?;
    let renderer = QuickChart::new(settings.chart_base_url.as_str());
    let host = crate::notify::host_name();
    pipeline::complete_run(
        gate,
        digest,
        slack,
        &settings.source.regions,
        &host,
        &renderer,
        &notifier,
    )?;
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let settings = Settings::from_env(false)?;
    let today = args.date.unwrap_or_else(local_today);

    let digest = pipeline::sync_digest(&settings, kdca_client(&settings)?, today)?;
    print_digest(&digest, args.width, args.height);
    Ok(())
}

fn kdca_client(settings: &Settings) -> Result<KdcaClient, AppError> {
    KdcaClient::new(&settings.source)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to set up HTTP client: {e}")))
}

fn print_digest(digest: &Digest, width: usize, height: usize) {
    println!("{}", crate::report::format_digest(digest));
    println!("{}", crate::plot::render_series_plot(&digest.series, width, height));
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Rewrite argv so `c19` defaults to `c19 run`.
///
/// Rules:
/// - `c19`                      -> `c19 run`
/// - `c19 --date D ...`         -> `c19 run --date D ...`
/// - `c19 --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "show");
    if is_subcommand {
        return argv;
    }

    // `--debug` is global; look past it for an explicit subcommand.
    let has_subcommand = argv[1..].iter().any(|a| matches!(a.as_str(), "run" | "show"));
    if arg1.starts_with('-') && !has_subcommand {
        argv.insert(1, "run".to_string());
    }
    argv
}
