//! Flattening of Slack messages into single-line CSV text

use chrono::{DateTime, Utc};

use crate::core::models::HistoryMessage;

/// Replace raw `\n` / `\r` with their literal two-character escapes.
#[must_use]
pub fn sanitize_new_lines(input: &str) -> String {
    input.replace('\n', "\\n").replace('\r', "\\r")
}

/// Join the body, file names/previews and attachment fallbacks, separated by raw line breaks.
#[must_use]
pub fn join_message_parts(message: &HistoryMessage) -> String {
    let mut text = message.text.clone().unwrap_or_default();

    for file in &message.files {
        text.push('\n');
        text.push_str(file.name.as_deref().unwrap_or_default());
        text.push('\n');
        text.push_str(file.preview.as_deref().unwrap_or_default());
    }

    for attachment in &message.attachments {
        text.push('\n');
        text.push_str(attachment.fallback.as_deref().unwrap_or_default());
    }

    text
}

/// Join the message parts into one line, escaping every line break.
#[must_use]
pub fn flatten_message(message: &HistoryMessage) -> String {
    sanitize_new_lines(&join_message_parts(message))
}

/// Parse a Slack `ts` such as `"1577836800.000200"` into whole-second UTC time.
///
/// # Errors
///
/// Returns a description of the problem when `ts` is not a finite, representable Unix time.
pub fn parse_slack_ts(ts: &str) -> Result<DateTime<Utc>, String> {
    let seconds: f64 = ts
        .trim()
        .parse()
        .map_err(|e| format!("timestamp {} not valid, cannot parse. Err: {}", ts, e))?;

    if !seconds.is_finite() {
        return Err(format!("timestamp {} is not a finite number", ts));
    }

    // sub-second precision is dropped
    #[allow(clippy::cast_possible_truncation)]
    let whole = seconds.trunc() as i64;

    DateTime::from_timestamp(whole, 0)
        .ok_or_else(|| format!("timestamp {} is out of range", ts))
}
