//! Shared daily pipeline used by both `c19 run` and `c19 show`.
//!
//! gate -> window plan (cache -> fetch per day) -> parse per cached day ->
//! aggregate -> hand-off to reporting
//!
//! The front-ends only decide what to do with the outcome (post vs print).

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::{Settings, SlackSettings};
use crate::data::{DateWindow, DayCache, DayFetcher, ResultGate, plan_window};
use crate::domain::{CachedDay, DayRecords, Digest};
use crate::error::AppError;
use crate::notify::{ChartRenderer, ChartStyle, MessageContext, Notifier, build_notification};
use crate::parse::parse_record;

/// What a gated daily run ended with.
#[derive(Debug)]
pub enum RunOutcome {
    /// Today's marker already exists; nothing was fetched.
    AlreadyDone { marker: PathBuf },
    /// The window synced but today's record could not be fetched yet.
    /// Nothing is reported and the marker stays unset so a later run retries.
    TodayNotPublished(Digest),
    /// Ready to hand to reporting.
    Ready(Digest),
}

/// Delivery tally of one publish pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Sync the window ending on `today` and aggregate it.
pub fn sync_digest<F: DayFetcher>(
    settings: &Settings,
    fetcher: F,
    today: NaiveDate,
) -> Result<Digest, AppError> {
    let cache = DayCache::open(
        &settings.files.dir_download,
        settings.files.file_name.as_str(),
        fetcher,
    )?;
    let window = DateWindow::trailing(today, settings.source.window_days);
    let files = plan_window(&cache, window)?;
    let days = load_days(&files, &settings.source.regions)?;
    Ok(crate::report::aggregate(&days, today))
}

/// Parse every cached day. A file that does not parse aborts the run.
pub fn load_days(files: &[CachedDay], regions: &[String]) -> Result<Vec<DayRecords>, AppError> {
    files
        .iter()
        .map(|day| {
            let raw = fs::read(&day.path)
                .map_err(|e| AppError::io(format!("Failed to read cached record '{}'", day.path.display()), e))?;
            let entries = parse_record(&raw, regions).map_err(|e| AppError::malformed_cache(&day.path, e))?;
            Ok(DayRecords {
                day: day.clone(),
                entries,
            })
        })
        .collect()
}

/// Gated run: skip when today's marker exists, otherwise sync and aggregate.
///
/// `Ready` only requires today's raw record in the cache. Metrics it does not
/// date today stay absent. The marker is not written here; see `complete_run`.
pub fn run_gated<F: DayFetcher>(
    settings: &Settings,
    fetcher: F,
    gate: &ResultGate,
    today: NaiveDate,
) -> Result<RunOutcome, AppError> {
    if !gate.should_run() {
        return Ok(RunOutcome::AlreadyDone {
            marker: gate.marker_path().to_path_buf(),
        });
    }

    let digest = sync_digest(settings, fetcher, today)?;
    if !digest.has_today_file() {
        tracing::warn!(%today, "today's record not available yet; will retry on next run");
        return Ok(RunOutcome::TodayNotPublished(digest));
    }
    Ok(RunOutcome::Ready(digest))
}

/// Render a chart and send one message per configured language.
///
/// Failures are logged and counted, never returned.
pub fn publish<R, N>(
    digest: &Digest,
    slack: &SlackSettings,
    regions: &[String],
    host: &str,
    renderer: &R,
    notifier: &N,
) -> DeliveryReport
where
    R: ChartRenderer + ?Sized,
    N: Notifier + ?Sized,
{
    let mut report = DeliveryReport::default();
    let ctx = MessageContext {
        host,
        date: digest.today,
        icon_url: slack.icon_url.as_deref(),
    };

    for &lang in &slack.languages {
        let image = match renderer.render(&digest.series, &ChartStyle::localized(lang)) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::error!(lang = lang.code(), error = %err, "chart rendering failed; sending without image");
                None
            }
        };

        let message = build_notification(digest, lang, ctx, regions, image);
        match notifier.deliver(&slack.channel_id, &message) {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                tracing::error!(lang = lang.code(), error = %err, "notification delivery failed");
                report.failed += 1;
            }
        }
    }
    report
}

/// Publish the digest, then write today's marker.
///
/// The marker is written even when some deliveries failed.
pub fn complete_run<R, N>(
    gate: &ResultGate,
    digest: &Digest,
    slack: &SlackSettings,
    regions: &[String],
    host: &str,
    renderer: &R,
    notifier: &N,
) -> Result<DeliveryReport, AppError>
where
    R: ChartRenderer + ?Sized,
    N: Notifier + ?Sized,
{
    let report = publish(digest, slack, regions, host, renderer, notifier);
    tracing::info!(delivered = report.delivered, failed = report.failed, "digest handed off");
    gate.mark_done()?;
    Ok(report)
}
