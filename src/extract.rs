//! Channel resolution and paginated history export

use std::io::Write;

use tracing::{error, info, warn};

use crate::core::config::ExtractOptions;
use crate::core::models::{
    ChannelRef, ExtractionSummary, HistoryMessage, HistoryPage, MessageRecord, TimeWindow,
};
use crate::core::ports::HistorySource;
use crate::errors::HistoryError;
use crate::sink::CsvSink;
use crate::utils::filters::should_export;
use crate::utils::stopwords::remove_stopwords;
use crate::utils::text::{flatten_message, join_message_parts, parse_slack_ts};

/// Look up `name` in the full channel list. The first match wins.
///
/// # Errors
///
/// Returns `HistoryError::ChannelNotFound` if no channel carries that name, or the
/// source's error if the listing fails.
pub async fn resolve_channel<S>(source: &S, name: &str) -> Result<ChannelRef, HistoryError>
where
    S: HistorySource + ?Sized,
{
    let channels = source.list_channels().await?;

    let channel = channels
        .into_iter()
        .find(|ch| ch.name == name)
        .ok_or_else(|| HistoryError::ChannelNotFound(name.to_string()))?;

    info!("Resolved channel {} to {}", channel.name, channel.id);
    Ok(channel)
}

/// Turn a raw message into the row that gets exported.
///
/// An unparseable `ts` is logged and leaves the timestamp empty. Stopword filtering works on
/// the raw parts, so line breaks become word separators instead of escape sequences.
#[must_use]
pub fn normalize_message(message: &HistoryMessage, include_stopwords: bool) -> MessageRecord {
    let timestamp = match parse_slack_ts(&message.ts) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    let text = if include_stopwords {
        flatten_message(message)
    } else {
        remove_stopwords(&join_message_parts(message))
    };

    MessageRecord {
        timestamp,
        user: message.user.clone().unwrap_or_default(),
        text,
    }
}

/// Walks a channel's history backward one page at a time, writing each page before
/// requesting the next.
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    #[must_use]
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Export every message of `channel` inside `window` to `sink`.
    ///
    /// # Errors
    ///
    /// Fails on the first page that cannot be fetched or written, and with
    /// `HistoryError::EmptyPage` when Slack claims more history but returns none. Rows
    /// written before the failure remain flushed in the sink.
    pub async fn run<S, W>(
        &self,
        source: &S,
        channel: &ChannelRef,
        mut window: TimeWindow,
        sink: &mut CsvSink<W>,
    ) -> Result<ExtractionSummary, HistoryError>
    where
        S: HistorySource + ?Sized,
        W: Write,
    {
        let mut summary = ExtractionSummary {
            channel: Some(channel.clone()),
            ..Default::default()
        };

        loop {
            if summary.pages > 0 && !self.options.page_delay.is_zero() {
                tokio::time::sleep(self.options.page_delay).await;
            }

            info!(
                "Querying {} from latest={} oldest={}",
                channel.id, window.latest, window.oldest
            );
            let page = source.fetch_history(&channel.id, &window).await?;
            summary.pages += 1;

            self.write_page(&page, sink, &mut summary)?;

            if !page.has_more {
                break;
            }

            let Some(last) = page.messages.last() else {
                error!(
                    "History page {} for {} has more messages but is empty",
                    summary.pages, channel.id
                );
                return Err(HistoryError::EmptyPage {
                    channel_id: channel.id.clone(),
                    latest: window.latest,
                });
            };

            if last.ts == window.latest {
                return Err(HistoryError::GeneralError(format!(
                    "pagination cursor for {} did not advance past {}",
                    channel.id, window.latest
                )));
            }

            info!("lastMessageTs {}", last.ts);
            window.advance_to(&last.ts);
        }

        info!(
            "Exported {} records from {} pages ({} bot messages skipped)",
            summary.records_written, summary.pages, summary.bots_skipped
        );
        Ok(summary)
    }

    fn write_page<W: Write>(
        &self,
        page: &HistoryPage,
        sink: &mut CsvSink<W>,
        summary: &mut ExtractionSummary,
    ) -> Result<(), HistoryError> {
        for message in &page.messages {
            if !should_export(message, self.options.include_bots) {
                summary.bots_skipped += 1;
                continue;
            }

            let record = normalize_message(message, self.options.include_stopwords);
            if record.timestamp.is_none() {
                summary.timestamp_failures += 1;
            }

            sink.write_record(&record)?;
            summary.records_written += 1;
            summary.aggregate.push(&record.text);
        }

        Ok(())
    }
}
