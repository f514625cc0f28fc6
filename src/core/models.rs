use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::HistoryError;

/// A channel name bound to its Slack identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub name: String,
    pub id: String,
}

impl ChannelRef {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Bounds of a history query, expressed as Slack `ts` strings.
///
/// `oldest` never changes during a run; `latest` walks backward as pages are consumed.
/// Both bounds are exclusive on the wire: history is requested with `inclusive=false`, so a
/// message whose `ts` equals either bound is not returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub oldest: String,
    pub latest: String,
}

impl TimeWindow {
    /// # Errors
    ///
    /// Returns `HistoryError::ConfigError` if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, HistoryError> {
        if start > end {
            return Err(HistoryError::ConfigError(format!(
                "start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }

        Ok(Self {
            oldest: start.timestamp().to_string(),
            latest: end.timestamp().to_string(),
        })
    }

    /// Move the upper bound to the `ts` of the last message seen.
    pub fn advance_to(&mut self, ts: &str) {
        self.latest = ts.to_string();
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryAttachment {
    #[serde(default)]
    pub fallback: Option<String>,
}

/// A single message as returned by `conversations.history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub files: Vec<HistoryFile>,
    #[serde(default)]
    pub attachments: Vec<HistoryAttachment>,
}

impl HistoryMessage {
    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.bot_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// One page of channel history, newest message first.
#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    pub messages: Vec<HistoryMessage>,
    pub has_more: bool,
}

/// One exported CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// `None` when the message `ts` could not be parsed.
    pub timestamp: Option<DateTime<Utc>>,
    pub user: String,
    pub text: String,
}

impl MessageRecord {
    #[must_use]
    pub fn timestamp_field(&self) -> String {
        self.timestamp
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn to_row(&self) -> [String; 3] {
        [self.timestamp_field(), self.user.clone(), self.text.clone()]
    }
}

/// Space-joined text of every exported record, handed to the analysis step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateText {
    buf: String,
}

impl AggregateText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(text);
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Outcome of a completed extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractionSummary {
    pub channel: Option<ChannelRef>,
    pub pages: usize,
    pub records_written: usize,
    pub bots_skipped: usize,
    pub timestamp_failures: usize,
    pub aggregate: AggregateText,
}
