//! Seams between the extractor and the remote Slack workspace.

use async_trait::async_trait;

use super::models::{ChannelRef, HistoryPage, TimeWindow};
use crate::errors::HistoryError;

/// Anything that can list channels and page through a channel's history.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Every channel visible to the credential, in listing order.
    async fn list_channels(&self) -> Result<Vec<ChannelRef>, HistoryError>;

    /// Fetch one page of messages in `window`, newest first.
    async fn fetch_history(
        &self,
        channel_id: &str,
        window: &TimeWindow,
    ) -> Result<HistoryPage, HistoryError>;
}
