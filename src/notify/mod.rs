//! Downstream reporting: chart image references and chat delivery.
//!
//! - localized text (`i18n`)
//! - message assembly (`message`)
//! - chart URL rendering (`chart`)
//! - Slack transport (`slack`)
//!
//! Delivery is best-effort. Callers log a `DeliveryError` and move on.

pub mod chart;
pub mod i18n;
pub mod message;
pub mod slack;

pub use chart::{ChartRenderer, ChartStyle, QuickChart};
pub use i18n::{Lang, MessageKey, text};
pub use message::{Field, MessageContext, Notification, build_notification};
pub use slack::{Notifier, SlackNotifier};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat API error: {0}")]
    Api(String),
    #[error("chart error: {0}")]
    Chart(String),
}

/// Identifier of the machine the run happens on.
pub fn host_name() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .chain(std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
