//! KDCA open API client (daily COVID-19 statistics, one calendar day per request).

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::SourceSettings;
use crate::parse::record::{SUCCESS_CODE, decode_envelope};

const PAGE_NO: &str = "1";
/// Enough rows for every subject of one day in a single page.
const NUM_OF_ROWS: &str = "500";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a day has no usable record. Normal control flow, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// Non-200 HTTP status.
    Status(u16),
    /// The API answered with a non-success result code.
    ResultCode { code: String, message: Option<String> },
    /// Success code, but the day has no items (e.g. a holiday).
    NoItems,
}

impl std::fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsentReason::Status(code) => write!(f, "HTTP status {code}"),
            AbsentReason::ResultCode { code, message } => match message {
                Some(msg) => write!(f, "result code {code} ({msg})"),
                None => write!(f, "result code {code}"),
            },
            AbsentReason::NoItems => write!(f, "no items published"),
        }
    }
}

/// A request that could not be completed or understood.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unparsable response: {0}")]
    Payload(String),
}

/// Result of asking the remote source for one day.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Validated raw body, ready to be cached verbatim.
    Present(Vec<u8>),
    Absent(AbsentReason),
    Failed(FetchError),
}

/// Source of raw per-day records.
pub trait DayFetcher {
    fn fetch(&self, day: NaiveDate) -> FetchOutcome;
}

impl<F: DayFetcher + ?Sized> DayFetcher for &F {
    fn fetch(&self, day: NaiveDate) -> FetchOutcome {
        (**self).fetch(day)
    }
}

pub struct KdcaClient {
    client: Client,
    url: String,
    service_key: String,
}

impl KdcaClient {
    pub fn new(settings: &SourceSettings) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: settings.url.clone(),
            service_key: settings.service_key.clone(),
        })
    }

    fn request(&self, day: NaiveDate) -> Result<FetchOutcome, FetchError> {
        let std_day = day.format("%Y-%m-%d").to_string();
        tracing::debug!(url = %self.url, %std_day, "requesting daily statistics");

        let resp = self
            .client
            .get(&self.url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("pageNo", PAGE_NO),
                ("numOfRows", NUM_OF_ROWS),
                ("apiType", "xml"),
                ("std_day", std_day.as_str()),
            ])
            .send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Ok(FetchOutcome::Absent(AbsentReason::Status(status.as_u16())));
        }

        let body = resp.bytes()?.to_vec();
        let envelope = decode_envelope(&body).map_err(|e| FetchError::Payload(e.to_string()))?;

        if envelope.result_code() != SUCCESS_CODE {
            return Ok(FetchOutcome::Absent(AbsentReason::ResultCode {
                code: envelope.result_code().to_string(),
                message: envelope.header.result_msg.clone(),
            }));
        }
        if envelope.items().is_empty() {
            return Ok(FetchOutcome::Absent(AbsentReason::NoItems));
        }

        Ok(FetchOutcome::Present(body))
    }
}

impl DayFetcher for KdcaClient {
    fn fetch(&self, day: NaiveDate) -> FetchOutcome {
        self.request(day).unwrap_or_else(FetchOutcome::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const OK_BODY: &str = "<response><header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>\
        <body><items><item><gubunEn>Total</gubunEn><incDec>10335</incDec><stdDay>2023-03-10</stdDay></item></items></body></response>";

    fn client_for(server: &MockServer) -> KdcaClient {
        KdcaClient::new(&SourceSettings {
            url: server.url("/getCovid19InfStateJson"),
            service_key: "test-key".to_string(),
            regions: vec![],
            window_days: 13,
        })
        .unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, 10).unwrap()
    }

    #[test]
    fn sends_expected_query_and_returns_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/getCovid19InfStateJson")
                .query_param("serviceKey", "test-key")
                .query_param("pageNo", "1")
                .query_param("numOfRows", "500")
                .query_param("apiType", "xml")
                .query_param("std_day", "2023-03-10");
            then.status(200).body(OK_BODY);
        });

        let outcome = client_for(&server).fetch(day());
        mock.assert();
        match outcome {
            FetchOutcome::Present(body) => assert_eq!(body, OK_BODY.as_bytes()),
            other => panic!("expected Present, got {other:?}"),
        }
    }

    #[test]
    fn non_200_is_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(500).body("Internal Server Error");
        });

        let outcome = client_for(&server).fetch(day());
        assert!(matches!(outcome, FetchOutcome::Absent(AbsentReason::Status(500))));
    }

    #[test]
    fn error_result_code_is_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body(
                "<response><header><resultCode>99</resultCode><resultMsg>SERVICE KEY IS NOT REGISTERED ERROR.</resultMsg></header></response>",
            );
        });

        match client_for(&server).fetch(day()) {
            FetchOutcome::Absent(AbsentReason::ResultCode { code, message }) => {
                assert_eq!(code, "99");
                assert_eq!(message.as_deref(), Some("SERVICE KEY IS NOT REGISTERED ERROR."));
            }
            other => panic!("expected ResultCode, got {other:?}"),
        }
    }

    #[test]
    fn success_without_items_is_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body(
                "<response><header><resultCode>00</resultCode></header><body><items></items><totalCount>0</totalCount></body></response>",
            );
        });

        let outcome = client_for(&server).fetch(day());
        assert!(matches!(outcome, FetchOutcome::Absent(AbsentReason::NoItems)));
    }

    #[test]
    fn garbage_payload_is_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body("<html><body>gateway error");
        });

        let outcome = client_for(&server).fetch(day());
        assert!(matches!(outcome, FetchOutcome::Failed(FetchError::Payload(_))));
    }

    #[test]
    fn connection_refused_is_failed() {
        let client = KdcaClient::new(&SourceSettings {
            url: "http://127.0.0.1:9/unreachable".to_string(),
            service_key: "k".to_string(),
            regions: vec![],
            window_days: 13,
        })
        .unwrap();

        let outcome = client.fetch(day());
        assert!(matches!(outcome, FetchOutcome::Failed(FetchError::Network(_))));
    }

    #[test]
    fn absent_reason_display() {
        assert_eq!(AbsentReason::Status(404).to_string(), "HTTP status 404");
        assert_eq!(AbsentReason::NoItems.to_string(), "no items published");
        assert_eq!(
            AbsentReason::ResultCode {
                code: "03".into(),
                message: Some("NODATA_ERROR".into())
            }
            .to_string(),
            "result code 03 (NODATA_ERROR)"
        );
    }
}
