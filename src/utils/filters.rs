use crate::core::models::HistoryMessage;

/// Whether a message should produce a CSV row.
///
/// Bot-originated messages are dropped unless `include_bots` is set.
#[must_use]
pub fn should_export(message: &HistoryMessage, include_bots: bool) -> bool {
    include_bots || !message.is_bot()
}
