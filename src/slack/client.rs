//! Slack API client module
//!
//! Channel listing goes through the slack-morphism session with retry; history pages are
//! fetched over raw HTTP so file previews survive deserialization.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiConversationsListRequest;
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackCursorId};
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::{debug, info, warn};

use crate::core::models::{ChannelRef, HistoryMessage, HistoryPage, TimeWindow};
use crate::core::ports::HistorySource;
use crate::errors::HistoryError;

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a HistoryError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

const CONVERSATIONS_HISTORY_URL: &str = "https://slack.com/api/conversations.history";

/// Messages requested per history page.
pub const HISTORY_PAGE_LIMIT: u16 = 200;

/// Channels requested per `conversations.list` page.
pub const CHANNEL_PAGE_LIMIT: u16 = 200;

const MAX_RATE_LIMIT_RETRIES: u32 = 5;

/// Raw `conversations.history` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<HistoryMessage>,
    #[serde(default)]
    has_more: bool,
}

impl HistoryResponse {
    fn is_rate_limited(&self) -> bool {
        matches!(self.error.as_deref(), Some("ratelimited" | "rate_limited"))
    }

    fn into_page(self) -> Result<HistoryPage, HistoryError> {
        if !self.ok {
            return Err(HistoryError::ApiError(format!(
                "conversations.history error: {}",
                self.error.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(HistoryPage {
            messages: self.messages,
            has_more: self.has_more,
        })
    }
}

/// Slack API client for channel listing and history paging
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, HistoryError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, HistoryError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(5);

        Retry::spawn(strategy, operation).await
    }

    /// Fetch one `conversations.list` page starting at `cursor`.
    async fn list_channels_page(
        &self,
        cursor: Option<&SlackCursorId>,
    ) -> Result<(Vec<ChannelRef>, Option<SlackCursorId>), HistoryError> {
        self.with_retry(|| async {
            let session = SLACK_CLIENT
                .as_ref()
                .ok_or_else(|| {
                    HistoryError::GeneralError("Slack HTTP connector not initialized".to_string())
                })?
                .open_session(&self.token);

            let mut request = SlackApiConversationsListRequest::new()
                .with_exclude_archived(true)
                .with_limit(CHANNEL_PAGE_LIMIT);
            if let Some(c) = cursor {
                request = request.with_cursor(c.clone());
            }

            let result = session.conversations_list(&request).await?;

            let channels = result
                .channels
                .into_iter()
                .filter_map(|ch| ch.name.map(|name| ChannelRef::new(name, ch.id.0)))
                .collect();

            let next = result
                .response_metadata
                .and_then(|meta| meta.next_cursor)
                .filter(|c| !c.0.is_empty());

            Ok((channels, next))
        })
        .await
    }

    /// # Errors
    ///
    /// Returns an error if any `conversations.list` page cannot be fetched.
    pub async fn get_channels(&self) -> Result<Vec<ChannelRef>, HistoryError> {
        let mut channels = Vec::new();
        let mut cursor: Option<SlackCursorId> = None;

        loop {
            let (page, next) = self.list_channels_page(cursor.as_ref()).await?;
            debug!("conversations.list returned {} channels", page.len());
            channels.extend(page);

            match next {
                Some(c) => cursor = Some(c),
                None => break,
            }
        }

        info!("Listed {} channels", channels.len());
        Ok(channels)
    }

    /// Fetch one page of `conversations.history`, waiting out Slack rate limits.
    ///
    /// `latest` is exclusive so the message used as the cursor is not returned again.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, Slack responds with `ok: false`, or the
    /// rate limit persists past the retry budget.
    pub async fn get_channel_history(
        &self,
        channel_id: &str,
        window: &TimeWindow,
    ) -> Result<HistoryPage, HistoryError> {
        let limit = HISTORY_PAGE_LIMIT.to_string();
        let query = [
            ("channel", channel_id),
            ("oldest", window.oldest.as_str()),
            ("latest", window.latest.as_str()),
            ("limit", limit.as_str()),
            ("inclusive", "false"),
        ];
        let mut attempts = 0;

        loop {
            attempts += 1;

            let resp = HTTP_CLIENT
                .get(CONVERSATIONS_HISTORY_URL)
                .bearer_auth(&self.token.token_value.0)
                .query(&query)
                .send()
                .await
                .map_err(|e| {
                    HistoryError::HttpError(format!("conversations.history request failed: {e}"))
                })?;

            if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempts >= MAX_RATE_LIMIT_RETRIES {
                    return Err(HistoryError::ApiError(format!(
                        "Rate limited after {MAX_RATE_LIMIT_RETRIES} retries"
                    )));
                }

                let retry_after = Self::parse_retry_after(&resp);
                warn!(
                    "Slack rate limited (429), waiting {}s before retry (attempt {}/{})",
                    retry_after.as_secs(),
                    attempts,
                    MAX_RATE_LIMIT_RETRIES
                );
                tokio::time::sleep(retry_after).await;
                continue;
            }

            if !resp.status().is_success() {
                return Err(HistoryError::ApiError(format!(
                    "conversations.history HTTP {}",
                    resp.status()
                )));
            }

            let body: HistoryResponse = resp.json().await.map_err(|e| {
                HistoryError::ParseError(format!("conversations.history JSON parse error: {e}"))
            })?;

            if body.is_rate_limited() {
                if attempts >= MAX_RATE_LIMIT_RETRIES {
                    return Err(HistoryError::ApiError(format!(
                        "Rate limited (response body) after {MAX_RATE_LIMIT_RETRIES} retries"
                    )));
                }
                warn!(
                    "Slack rate limited (response), waiting 1s before retry (attempt {}/{})",
                    attempts, MAX_RATE_LIMIT_RETRIES
                );
                tokio::time::sleep(Duration::from_secs(1)).await;
                continue;
            }

            return body.into_page();
        }
    }

    /// Parse the `Retry-After` header from an HTTP 429 response.
    ///
    /// Falls back to a default of 1 second if the header is missing or invalid.
    fn parse_retry_after(resp: &reqwest::Response) -> Duration {
        resp.headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map_or(Duration::from_secs(1), Duration::from_secs)
    }
}

#[async_trait]
impl HistorySource for SlackClient {
    async fn list_channels(&self) -> Result<Vec<ChannelRef>, HistoryError> {
        self.get_channels().await
    }

    async fn fetch_history(
        &self,
        channel_id: &str,
        window: &TimeWindow,
    ) -> Result<HistoryPage, HistoryError> {
        self.get_channel_history(channel_id, window).await
    }
}
