//! All Slack-specific functionality

pub mod client;

pub use client::{CHANNEL_PAGE_LIMIT, HISTORY_PAGE_LIMIT, SlackClient};
