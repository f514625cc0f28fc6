use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Cannot find a channel with name {0}")]
    ChannelNotFound(String),

    #[error("Failed to parse Slack response: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to write output: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write CSV record: {0}")]
    CsvError(#[from] csv::Error),

    #[error("History page for {channel_id} reported more messages but was empty (latest={latest})")]
    EmptyPage { channel_id: String, latest: String },

    #[error("{0}")]
    GeneralError(String),
}

impl From<SlackClientError> for HistoryError {
    fn from(error: SlackClientError) -> Self {
        HistoryError::ApiError(error.to_string())
    }
}

impl From<reqwest::Error> for HistoryError {
    fn from(error: reqwest::Error) -> Self {
        HistoryError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for HistoryError {
    fn from(error: anyhow::Error) -> Self {
        HistoryError::GeneralError(error.to_string())
    }
}
