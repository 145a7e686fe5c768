//! Chat message assembled from a digest.

use chrono::NaiveDate;

use crate::domain::{Digest, Metric};
use crate::notify::i18n::{Lang, MessageKey, text};

/// Shown for a metric the day's record did not carry.
const MISSING_VALUE: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub title: String,
    pub value: String,
}

/// Channel-agnostic message content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub lang: Lang,
    pub fallback_text: String,
    pub header: String,
    /// `<host>, <YYYY-MM-DD>`.
    pub context: String,
    pub headline: String,
    pub trend_title: String,
    pub fields_title: String,
    pub fields: Vec<Field>,
    pub footer: String,
    pub footer_icon: Option<String>,
    pub image_title: String,
    pub image_url: Option<String>,
}

/// Static parts of a message that do not come from the digest.
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    pub host: &'a str,
    pub date: NaiveDate,
    pub icon_url: Option<&'a str>,
}

pub fn build_notification(
    digest: &Digest,
    lang: Lang,
    ctx: MessageContext<'_>,
    regions: &[String],
    image_url: Option<String>,
) -> Notification {
    let t = |key| text(lang, key);
    let value = |metric: &Metric| {
        digest
            .summary
            .get(metric)
            .unwrap_or(MISSING_VALUE)
            .to_string()
    };

    let mut fields = vec![
        Field {
            title: t(MessageKey::FieldNewCases).to_string(),
            value: value(&Metric::NewCases),
        },
        Field {
            title: t(MessageKey::FieldDomestic).to_string(),
            value: value(&Metric::Domestic),
        },
        Field {
            title: t(MessageKey::FieldImported).to_string(),
            value: value(&Metric::Imported),
        },
    ];
    for region in regions {
        fields.push(Field {
            title: region_title(digest, lang, region),
            value: value(&Metric::RegionNewCases(region.clone())),
        });
    }
    fields.push(Field {
        title: t(MessageKey::FieldCumulative).to_string(),
        value: value(&Metric::Cumulative),
    });
    fields.push(Field {
        title: t(MessageKey::FieldDeaths).to_string(),
        value: value(&Metric::Deaths),
    });

    Notification {
        lang,
        fallback_text: t(MessageKey::Notification).to_string(),
        header: t(MessageKey::Title).to_string(),
        context: format!("{}, {}", ctx.host, ctx.date.format("%Y-%m-%d")),
        headline: format!("{}{}", t(MessageKey::NewCasesHeadline), value(&Metric::NewCases)),
        trend_title: t(MessageKey::TrendHeadline).to_string(),
        fields_title: t(MessageKey::DailyTitle).to_string(),
        fields,
        footer: t(MessageKey::Footer).to_string(),
        footer_icon: ctx.icon_url.map(str::to_string),
        image_title: t(MessageKey::ChartTitle).to_string(),
        image_url,
    }
}

/// Korean messages use the feed's own region name when it is known.
fn region_title(digest: &Digest, lang: Lang, region: &str) -> String {
    match (lang, digest.region_names.get(region)) {
        (Lang::Ko, Some(local)) => local.clone(),
        _ => region.to_string(),
    }
}
