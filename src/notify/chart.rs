//! Chart image references for the daily series.
//!
//! The chart is not drawn locally: a Chart.js configuration is encoded into a
//! QuickChart URL, which chat clients render as an image.

use reqwest::Url;
use serde_json::json;

use crate::domain::TimeSeries;
use crate::notify::DeliveryError;
use crate::notify::i18n::{Lang, MessageKey, text};

/// Everything that styles one chart, passed in per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    pub title: String,
    pub series_label: String,
    pub x_label: String,
    pub y_label: String,
    pub line_color: String,
    pub fill_color: String,
    pub background: String,
}

impl ChartStyle {
    pub fn localized(lang: Lang) -> Self {
        Self {
            title: text(lang, MessageKey::PlotTitle).to_string(),
            series_label: text(lang, MessageKey::PlotSeries).to_string(),
            x_label: text(lang, MessageKey::PlotXLabel).to_string(),
            y_label: text(lang, MessageKey::PlotYLabel).to_string(),
            line_color: "rgb(255, 99, 132)".to_string(),
            fill_color: "rgba(255, 99, 132, 0.5)".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

/// Turns a series into an image reference (a URL).
pub trait ChartRenderer {
    fn render(&self, series: &TimeSeries, style: &ChartStyle) -> Result<String, DeliveryError>;
}

pub struct QuickChart {
    base_url: String,
}

impl QuickChart {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl ChartRenderer for QuickChart {
    fn render(&self, series: &TimeSeries, style: &ChartStyle) -> Result<String, DeliveryError> {
        let config = chart_config(series, style);
        let url = Url::parse_with_params(
            &self.base_url,
            &[("bkg", style.background.as_str()), ("c", config.to_string().as_str())],
        )
        .map_err(|e| DeliveryError::Chart(format!("invalid chart base URL '{}': {e}", self.base_url)))?;
        Ok(url.to_string())
    }
}

/// Chart.js (v2) configuration: a single line dataset over the series.
pub fn chart_config(series: &TimeSeries, style: &ChartStyle) -> serde_json::Value {
    json!({
        "type": "bar",
        "data": {
            "labels": series.labels(),
            "datasets": [{
                "type": "line",
                "label": style.series_label,
                "borderColor": style.line_color,
                "backgroundColor": style.fill_color,
                "fill": false,
                "data": series.values(),
            }]
        },
        "options": {
            "title": { "display": true, "text": style.title },
            "scales": {
                "xAxes": [{ "scaleLabel": { "display": true, "labelString": style.x_label } }],
                "yAxes": [{
                    "ticks": { "beginAtZero": true },
                    "scaleLabel": { "display": true, "labelString": style.y_label }
                }]
            }
        }
    })
}
