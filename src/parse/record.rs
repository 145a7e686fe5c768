//! KDCA XML record decoding.
//!
//! The same envelope decoding is used twice: by the fetcher to validate a fresh
//! response before it is cached, and by the parser to read a cached file back.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Count, ParsedEntry, Subject, TOTAL_SUBJECT};

/// Result code the API uses for a normal response.
pub const SUCCESS_CODE: &str = "00";

/// Date layouts seen in `stdDay`; the Korean one comes from older responses.
const STD_DAY_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y년 %m월 %d일 %H시"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("not a well-formed record: {0}")]
    Malformed(String),
    #[error("subject '{subject}' is missing field '{field}'")]
    MissingField { subject: String, field: &'static str },
    #[error("subject '{subject}' has non-integer {field} '{value}'")]
    InvalidNumber {
        subject: String,
        field: &'static str,
        value: String,
    },
    #[error("subject '{subject}' has unrecognized stdDay '{value}'")]
    InvalidDate { subject: String, value: String },
}

/// `<response>` document.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub header: Header,
    #[serde(default)]
    pub body: Option<Body>,
}

#[derive(Debug, Deserialize)]
pub struct Header {
    #[serde(rename = "resultCode")]
    pub result_code: String,
    #[serde(rename = "resultMsg", default)]
    pub result_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub items: Option<Items>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Items {
    #[serde(default)]
    pub item: Vec<Item>,
}

/// One `<item>`; every field is optional at this level.
#[derive(Debug, Default, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub gubun: Option<String>,
    #[serde(rename = "gubunEn", default)]
    pub gubun_en: Option<String>,
    #[serde(rename = "incDec", default)]
    pub inc_dec: Option<String>,
    #[serde(rename = "defCnt", default)]
    pub def_cnt: Option<String>,
    #[serde(rename = "localOccCnt", default)]
    pub local_occ_cnt: Option<String>,
    #[serde(rename = "overFlowCnt", default)]
    pub over_flow_cnt: Option<String>,
    #[serde(rename = "deathCnt", default)]
    pub death_cnt: Option<String>,
    #[serde(rename = "stdDay", default)]
    pub std_day: Option<String>,
}

impl Envelope {
    pub fn result_code(&self) -> &str {
        self.header.result_code.trim()
    }

    pub fn items(&self) -> &[Item] {
        self.body
            .as_ref()
            .and_then(|b| b.items.as_ref())
            .map(|items| items.item.as_slice())
            .unwrap_or(&[])
    }
}

/// Decode the XML envelope; anything that is not the expected document is `Malformed`.
pub fn decode_envelope(raw: &[u8]) -> Result<Envelope, ParseError> {
    let text = std::str::from_utf8(raw).map_err(|e| ParseError::Malformed(e.to_string()))?;
    quick_xml::de::from_str(text).map_err(|e| ParseError::Malformed(e.to_string()))
}

/// Extract the entries of interest from one raw record.
///
/// `regions` lists the English names of the regional subjects to keep; the
/// `Total` subject is always kept. Other subjects are skipped.
pub fn parse_record(raw: &[u8], regions: &[String]) -> Result<Vec<ParsedEntry>, ParseError> {
    let envelope = decode_envelope(raw)?;

    let mut out = Vec::new();
    for item in envelope.items() {
        let Some(name) = non_empty(&item.gubun_en) else {
            continue;
        };
        if name != TOTAL_SUBJECT && !regions.iter().any(|r| r == name) {
            continue;
        }
        out.push(entry_from_item(name, item)?);
    }
    Ok(out)
}

fn entry_from_item(name: &str, item: &Item) -> Result<ParsedEntry, ParseError> {
    let new_cases = count_field(name, "incDec", &item.inc_dec)?.ok_or_else(|| {
        ParseError::MissingField {
            subject: name.to_string(),
            field: "incDec",
        }
    })?;

    let raw_day = non_empty(&item.std_day).ok_or_else(|| ParseError::MissingField {
        subject: name.to_string(),
        field: "stdDay",
    })?;

    Ok(ParsedEntry {
        subject: Subject::from_english(name),
        local_name: non_empty(&item.gubun).map(str::to_string),
        new_cases,
        cumulative: count_field(name, "defCnt", &item.def_cnt)?,
        domestic: count_field(name, "localOccCnt", &item.local_occ_cnt)?,
        imported: count_field(name, "overFlowCnt", &item.over_flow_cnt)?,
        deaths: count_field(name, "deathCnt", &item.death_cnt)?,
        record_date: parse_std_day(name, raw_day)?,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn count_field(
    subject: &str,
    field: &'static str,
    value: &Option<String>,
) -> Result<Option<Count>, ParseError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    raw.parse::<i64>()
        .map(|v| Some(Count(v)))
        .map_err(|_| ParseError::InvalidNumber {
            subject: subject.to_string(),
            field,
            value: raw.to_string(),
        })
}

fn parse_std_day(subject: &str, raw: &str) -> Result<NaiveDate, ParseError> {
    STD_DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| ParseError::InvalidDate {
            subject: subject.to_string(),
            value: raw.to_string(),
        })
}
