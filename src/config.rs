//! Runtime settings.
//!
//! Settings come from the process environment, after loading a `.env` file if
//! one is present. Keys are grouped by section prefix (`COVID19_`, `FILES_`,
//! `SLACK_`, `CHART_`). Missing required keys stop the run before any I/O.

use std::path::PathBuf;

use crate::error::AppError;
use crate::notify::Lang;

pub const DEFAULT_WINDOW_DAYS: u32 = 13;
pub const DEFAULT_REGIONS: &str = "Incheon";
pub const DEFAULT_LANGUAGES: &str = "ko,ja,en";
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api/chat.postMessage";
pub const DEFAULT_CHART_BASE_URL: &str = "https://quickchart.io/chart";

/// Remote data source (`[COVID19]` section).
#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub url: String,
    pub service_key: String,
    /// English names of the regions reported next to the total.
    pub regions: Vec<String>,
    pub window_days: u32,
}

/// Local paths (`[FILES]` section).
#[derive(Debug, Clone)]
pub struct FileSettings {
    pub dir_download: PathBuf,
    pub dir_result: PathBuf,
    pub file_name: String,
    pub result_file_name: String,
}

/// Chat delivery (`[SLACK]` section).
#[derive(Debug, Clone)]
pub struct SlackSettings {
    pub bot_token: String,
    pub channel_id: String,
    pub icon_url: Option<String>,
    pub languages: Vec<Lang>,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub source: SourceSettings,
    pub files: FileSettings,
    /// Present only when the run delivers notifications.
    pub slack: Option<SlackSettings>,
    pub chart_base_url: String,
}

impl Settings {
    /// Load from `.env` + environment.
    pub fn from_env(with_slack: bool) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok(), with_slack)
    }

    /// Load from any key -> value source.
    pub fn from_lookup<L>(lookup: L, with_slack: bool) -> Result<Self, AppError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::config(format!("Missing required setting {key} in environment (.env).")))
        };

        let window_days = match get("COVID19_WINDOW_DAYS") {
            None => DEFAULT_WINDOW_DAYS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(AppError::config(format!(
                        "COVID19_WINDOW_DAYS must be a positive integer, got '{raw}'."
                    )));
                }
            },
        };

        let source = SourceSettings {
            url: require("COVID19_URL")?,
            service_key: require("COVID19_SERVICE_KEY")?,
            regions: split_list(&get("COVID19_REGIONS").unwrap_or_else(|| DEFAULT_REGIONS.to_string())),
            window_days,
        };

        let files = FileSettings {
            dir_download: PathBuf::from(require("FILES_DIR_DOWNLOAD")?),
            dir_result: PathBuf::from(require("FILES_DIR_RESULT")?),
            file_name: require("FILES_FILE_NAME")?,
            result_file_name: require("FILES_RESULT_FILE_NAME")?,
        };

        let slack = if with_slack {
            let languages = split_list(&get("SLACK_LANGUAGES").unwrap_or_else(|| DEFAULT_LANGUAGES.to_string()))
                .iter()
                .map(|code| {
                    Lang::from_code(code)
                        .ok_or_else(|| AppError::config(format!("Unsupported language '{code}' in SLACK_LANGUAGES.")))
                })
                .collect::<Result<Vec<_>, _>>()?;

            Some(SlackSettings {
                bot_token: require("SLACK_BOT_TOKEN")?,
                channel_id: require("SLACK_CHANNEL_ID")?,
                icon_url: get("SLACK_ICON_URL"),
                languages,
                api_url: get("SLACK_API_URL").unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string()),
            })
        } else {
            None
        };

        Ok(Self {
            source,
            files,
            slack,
            chart_base_url: get("CHART_BASE_URL").unwrap_or_else(|| DEFAULT_CHART_BASE_URL.to_string()),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("COVID19_URL", "http://apis.data.go.kr/1352000/ODMS_COVID_04/callCovid04Api"),
            ("COVID19_SERVICE_KEY", "secret"),
            ("FILES_DIR_DOWNLOAD", "download"),
            ("FILES_DIR_RESULT", "result"),
            ("FILES_FILE_NAME", "covid19.xml"),
            ("FILES_RESULT_FILE_NAME", "result.txt"),
        ])
    }

    fn load(map: &HashMap<&str, &str>, with_slack: bool) -> Result<Settings, AppError> {
        Settings::from_lookup(|k| map.get(k).map(|v| v.to_string()), with_slack)
    }

    #[test]
    fn loads_required_keys_with_defaults() {
        let settings = load(&base(), false).unwrap();
        assert_eq!(settings.source.service_key, "secret");
        assert_eq!(settings.source.window_days, DEFAULT_WINDOW_DAYS);
        assert_eq!(settings.source.regions, vec!["Incheon".to_string()]);
        assert_eq!(settings.files.dir_download, PathBuf::from("download"));
        assert_eq!(settings.files.result_file_name, "result.txt");
        assert!(settings.slack.is_none());
        assert_eq!(settings.chart_base_url, DEFAULT_CHART_BASE_URL);
    }

    #[test]
    fn missing_required_key_is_a_config_error() {
        let mut map = base();
        map.remove("FILES_DIR_RESULT");
        let err = load(&map, false).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
        assert!(err.message().contains("FILES_DIR_RESULT"));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let mut map = base();
        map.insert("COVID19_SERVICE_KEY", "   ");
        assert!(load(&map, false).unwrap_err().message().contains("COVID19_SERVICE_KEY"));
    }

    #[test]
    fn slack_keys_required_only_when_notifying() {
        assert!(load(&base(), false).is_ok());
        let err = load(&base(), true).unwrap_err();
        assert!(err.message().contains("SLACK_BOT_TOKEN"));

        let mut map = base();
        map.insert("SLACK_BOT_TOKEN", "xoxb-1");
        map.insert("SLACK_CHANNEL_ID", "C123");
        map.insert("SLACK_LANGUAGES", "en, ko");
        let slack = load(&map, true).unwrap().slack.unwrap();
        assert_eq!(slack.languages, vec![Lang::En, Lang::Ko]);
        assert_eq!(slack.api_url, DEFAULT_SLACK_API_URL);
        assert!(slack.icon_url.is_none());
    }

    #[test]
    fn rejects_unknown_language_and_bad_window() {
        let mut map = base();
        map.insert("SLACK_BOT_TOKEN", "xoxb-1");
        map.insert("SLACK_CHANNEL_ID", "C123");
        map.insert("SLACK_LANGUAGES", "ko,fr");
        assert!(load(&map, true).unwrap_err().message().contains("'fr'"));

        let mut map = base();
        map.insert("COVID19_WINDOW_DAYS", "0");
        assert_eq!(load(&map, false).unwrap_err().exit_code(), crate::error::EXIT_CONFIG);
    }

    #[test]
    fn regions_are_a_comma_list() {
        let mut map = base();
        map.insert("COVID19_REGIONS", "Seoul, Incheon ,");
        let settings = load(&map, false).unwrap();
        assert_eq!(settings.source.regions, vec!["Seoul".to_string(), "Incheon".to_string()]);
    }
}
