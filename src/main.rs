use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use slack_history::classifier::train_demo;
use slack_history::core::config::{AppConfig, ExtractOptions, build_window};
use slack_history::extract::{Extractor, resolve_channel};
use slack_history::sink::CsvSink;
use slack_history::slack::SlackClient;
use slack_history::wordcloud::{WordCloudTarget, run_wordcloud};
use tracing::{error, info};

/// Export a Slack channel's history to CSV and render a word cloud from it
#[derive(Debug, Parser)]
#[command(name = "slack-history")]
#[command(about = "Exports Slack channel history to CSV", version)]
struct Cli {
    /// Start time in ISO8601
    #[arg(long, default_value = "2017-06-01T00:00:00-07:00")]
    start: String,

    /// End time in ISO8601 (default is current time)
    #[arg(long)]
    end: Option<String>,

    /// Channel name to get logs for
    #[arg(long, default_value = "devops")]
    channel: String,

    /// Where to write the CSV output
    #[arg(long = "write", default_value = "output.csv")]
    write: PathBuf,

    /// Include bot messages
    #[arg(long)]
    bots: bool,

    /// Include stop words
    #[arg(long)]
    stopwords: bool,

    /// Pause between history page requests, in milliseconds
    #[arg(long, default_value_t = 1000)]
    page_delay_ms: u64,

    /// Skip the classifier demo and word cloud
    #[arg(long)]
    skip_analysis: bool,

    /// Word cloud image path
    #[arg(long, default_value = "./wordcloud.png")]
    wordcloud_output: PathBuf,

    /// Aggregated text path
    #[arg(long, default_value = "./text2analyze.txt")]
    text_output: PathBuf,
}

impl Cli {
    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            include_bots: self.bots,
            include_stopwords: self.stopwords,
            page_delay: Duration::from_millis(self.page_delay_ms),
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env()?;
    let window = build_window(&cli.start, cli.end.as_deref(), chrono::Utc::now())?;

    let client = SlackClient::new(config.slack_token);
    let channel = resolve_channel(&client, &cli.channel)
        .await
        .context("Failed to get channels")?;

    let mut sink = CsvSink::create(&cli.write)?;
    let summary = Extractor::new(cli.extract_options())
        .run(&client, &channel, window, &mut sink)
        .await
        .context("Failed to get history for channel")?;

    println!("Wrote {}", cli.write.display());
    info!(
        "Exported {} rows ({} bot messages skipped, {} bad timestamps)",
        summary.records_written, summary.bots_skipped, summary.timestamp_failures
    );

    if cli.skip_analysis {
        return Ok(());
    }

    let model = train_demo().await?;
    info!(
        "Demo classifier prediction for exported text: {}",
        model.predict(summary.aggregate.as_str())
    );

    let target = WordCloudTarget {
        input_csv: cli.write.clone(),
        text_output: cli.text_output.clone(),
        image_output: cli.wordcloud_output.clone(),
    };
    run_wordcloud(&target, &summary.aggregate).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    slack_history::setup_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let cli = Cli::try_parse_from(["slack-history"]).unwrap();

        assert_eq!(cli.start, "2017-06-01T00:00:00-07:00");
        assert!(cli.end.is_none());
        assert_eq!(cli.channel, "devops");
        assert_eq!(cli.write, PathBuf::from("output.csv"));
        assert!(!cli.bots);
        assert!(!cli.stopwords);
        assert!(!cli.skip_analysis);

        let opts = cli.extract_options();
        assert_eq!(opts.page_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_args_with_all_options() {
        let cli = Cli::try_parse_from([
            "slack-history",
            "--start", "2020-01-01T00:00:00Z",
            "--end", "2020-01-02T00:00:00Z",
            "--channel", "general",
            "--write", "/tmp/out.csv",
            "--bots",
            "--stopwords",
            "--page-delay-ms", "0",
            "--skip-analysis",
        ])
        .unwrap();

        assert_eq!(cli.end.as_deref(), Some("2020-01-02T00:00:00Z"));
        assert_eq!(cli.channel, "general");

        let opts = cli.extract_options();
        assert!(opts.include_bots);
        assert!(opts.include_stopwords);
        assert!(opts.page_delay.is_zero());
    }

    #[test]
    fn test_args_rejects_bad_delay() {
        let result = Cli::try_parse_from(["slack-history", "--page-delay-ms", "soon"]);
        assert!(result.is_err());
    }
}
