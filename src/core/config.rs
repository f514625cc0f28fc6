use std::env;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::models::TimeWindow;
use crate::errors::HistoryError;

/// Environment variable holding the Slack API token.
pub const SLACK_TOKEN_ENV: &str = "SLACK_TOKEN";

/// Delay inserted between successive history page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_token: String,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `HistoryError::ConfigError` if `SLACK_TOKEN` is unset or empty.
    pub fn from_env() -> Result<Self, HistoryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process environment in production).
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::ConfigError` if the token is missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HistoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let slack_token = lookup(SLACK_TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                HistoryError::ConfigError(format!("Need {} env variable", SLACK_TOKEN_ENV))
            })?;

        Ok(Self { slack_token })
    }
}

/// Knobs for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub include_bots: bool,
    pub include_stopwords: bool,
    pub page_delay: Duration,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_bots: false,
            include_stopwords: false,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

/// Parse an RFC3339 / ISO-8601 timestamp supplied on the command line.
///
/// # Errors
///
/// Returns `HistoryError::ConfigError` naming `label` when the value is malformed.
pub fn parse_timestamp(label: &str, value: &str) -> Result<DateTime<Utc>, HistoryError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            HistoryError::ConfigError(format!(
                "Failed to parse {} timestamp {}. Err: {}",
                label, value, e
            ))
        })
}

/// Build the query window from the raw `--start` / `--end` values.
///
/// A missing or blank end falls back to `now`.
///
/// # Errors
///
/// Returns `HistoryError::ConfigError` if either timestamp is malformed or the
/// start lies after the end.
pub fn build_window(
    start: &str,
    end: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TimeWindow, HistoryError> {
    let start = parse_timestamp("start", start)?;
    let end = match end.map(str::trim).filter(|e| !e.is_empty()) {
        Some(raw) => parse_timestamp("end", raw)?,
        None => now,
    };

    TimeWindow::new(start, end)
}
