//! Slack `chat.postMessage` delivery.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::SlackSettings;
use crate::notify::DeliveryError;
use crate::notify::message::Notification;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ATTACHMENT_COLOR: &str = "#dddddd";

/// Sends a notification to one channel.
pub trait Notifier {
    fn deliver(&self, channel: &str, message: &Notification) -> Result<(), DeliveryError>;
}

pub struct SlackNotifier {
    client: Client,
    api_url: String,
    bot_token: String,
}

#[derive(Debug, Deserialize)]
struct SlackReply {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackNotifier {
    pub fn new(settings: &SlackSettings) -> Result<Self, DeliveryError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_url: settings.api_url.clone(),
            bot_token: settings.bot_token.clone(),
        })
    }
}

impl Notifier for SlackNotifier {
    fn deliver(&self, channel: &str, message: &Notification) -> Result<(), DeliveryError> {
        let payload = slack_payload(channel, message);
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.bot_token)
            .json(&payload)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DeliveryError::Api(format!("HTTP {status}")));
        }
        let reply: SlackReply = resp.json()?;
        if !reply.ok {
            return Err(DeliveryError::Api(
                reply.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        tracing::info!(channel, lang = message.lang.code(), "notification delivered");
        Ok(())
    }
}

/// Request body: header/context/sections as blocks, figures and chart as attachments.
pub fn slack_payload(channel: &str, message: &Notification) -> Value {
    let fields: Vec<Value> = message
        .fields
        .iter()
        .map(|f| json!({ "short": true, "title": f.title, "value": f.value }))
        .collect();

    let mut figures = json!({
        "title": message.fields_title,
        "color": ATTACHMENT_COLOR,
        "mrkdwn_in": ["title", "fields"],
        "fields": fields,
        "footer": message.footer,
    });
    if let Some(icon) = &message.footer_icon {
        figures["footer_icon"] = json!(icon);
    }

    let mut attachments = vec![figures];
    if let Some(image) = &message.image_url {
        attachments.push(json!({
            "color": ATTACHMENT_COLOR,
            "title": message.image_title,
            "image_url": image,
        }));
    }

    json!({
        "channel": channel,
        "text": message.fallback_text,
        "blocks": [
            { "type": "header", "text": { "type": "plain_text", "text": message.header } },
            { "type": "context", "elements": [{ "type": "plain_text", "text": message.context }] },
            { "type": "section", "text": { "type": "mrkdwn", "text": message.headline } },
            { "type": "section", "text": { "type": "mrkdwn", "text": message.trend_title } },
            { "type": "divider" }
        ],
        "attachments": attachments,
    })
}
