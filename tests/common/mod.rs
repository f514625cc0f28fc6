#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use slack_history::HistoryError;
use slack_history::core::models::{ChannelRef, HistoryMessage, HistoryPage, TimeWindow};
use slack_history::core::ports::HistorySource;
use tokio::time::Instant;

/// In-memory stand-in for the Slack workspace.
pub struct FakeSource {
    pub channels: Vec<ChannelRef>,
    pages: Mutex<VecDeque<Result<HistoryPage, HistoryError>>>,
    pub requests: Mutex<Vec<(String, TimeWindow)>>,
    pub fetched_at: Mutex<Vec<Instant>>,
}

impl FakeSource {
    pub fn new(channels: Vec<ChannelRef>, pages: Vec<HistoryPage>) -> Self {
        Self {
            channels,
            pages: Mutex::new(pages.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
            fetched_at: Mutex::new(Vec::new()),
        }
    }

    pub fn scripted(
        channels: Vec<ChannelRef>,
        pages: Vec<Result<HistoryPage, HistoryError>>,
    ) -> Self {
        Self {
            channels,
            pages: Mutex::new(pages.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            fetched_at: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, TimeWindow)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn fetched_at(&self) -> Vec<Instant> {
        self.fetched_at.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistorySource for FakeSource {
    async fn list_channels(&self) -> Result<Vec<ChannelRef>, HistoryError> {
        Ok(self.channels.clone())
    }

    async fn fetch_history(
        &self,
        channel_id: &str,
        window: &TimeWindow,
    ) -> Result<HistoryPage, HistoryError> {
        self.fetched_at.lock().unwrap().push(Instant::now());
        self.requests
            .lock()
            .unwrap()
            .push((channel_id.to_string(), window.clone()));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HistoryError::ApiError("no more pages scripted".to_string())))
    }
}

pub fn human(user: &str, text: &str, ts: &str) -> HistoryMessage {
    HistoryMessage {
        text: Some(text.to_string()),
        user: Some(user.to_string()),
        ts: ts.to_string(),
        ..Default::default()
    }
}

pub fn bot(text: &str, ts: &str) -> HistoryMessage {
    HistoryMessage {
        text: Some(text.to_string()),
        bot_id: Some("B01".to_string()),
        ts: ts.to_string(),
        ..Default::default()
    }
}

pub fn page(messages: Vec<HistoryMessage>, has_more: bool) -> HistoryPage {
    HistoryPage { messages, has_more }
}

pub fn read_rows(bytes: &[u8]) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}
