/// slack-history - exports a Slack channel's message history to CSV.
///
/// The crate resolves a channel by name, pages backward through its history between two
/// timestamps and writes one normalized row per message, flushing as it goes. The exported
/// text is then handed to a small naive Bayes demo and to the external `kumo` word-cloud
/// generator.
///
/// # Architecture
///
/// - `slack` talks to the Slack Web API through slack-morphism and reqwest
/// - `extract` drives pagination against any `HistorySource`
/// - `sink` writes the CSV with the csv crate
/// - `classifier` and `wordcloud` consume the aggregated text
///
/// # Example
///
/// ```no_run
/// use slack_history::core::config::{AppConfig, ExtractOptions, build_window};
/// use slack_history::extract::{Extractor, resolve_channel};
/// use slack_history::sink::CsvSink;
/// use slack_history::slack::SlackClient;
/// use std::path::Path;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     slack_history::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let client = SlackClient::new(config.slack_token);
///     let channel = resolve_channel(&client, "general").await?;
///     let window = build_window("2020-01-01T00:00:00Z", None, chrono::Utc::now())?;
///
///     let mut sink = CsvSink::create(Path::new("output.csv"))?;
///     let summary = Extractor::new(ExtractOptions::default())
///         .run(&client, &channel, window, &mut sink)
///         .await?;
///
///     println!("Wrote {} rows", summary.records_written);
///     Ok(())
/// }
/// ```
pub mod classifier;
pub mod core;
pub mod errors;
pub mod extract;
pub mod sink;
pub mod slack;
pub mod utils;
pub mod wordcloud;

pub use errors::HistoryError;

/// Configure structured JSON logging on stderr.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// slack_history::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if cfg!(feature = "debug-logs") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
