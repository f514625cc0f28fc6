//! Hand-off to the external `kumo` word-cloud generator

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, warn};

use crate::core::models::AggregateText;
use crate::errors::HistoryError;

pub const KUMO_BINARY: &str = "kumo";

pub const WORD_COUNT: u32 = 200;

/// Chat filler excluded from the rendered cloud.
pub const CLOUD_STOP_WORDS: &str = concat!(
    "related,come,team,server,things,run,work,right,added,channel,wondering,bin,",
    "bunch,occured,you're,day,mean,recently,output,slightly_smiling_face,looks,pod,",
    "ok,okay,going,help,just,try,ticket,issue,service,look,thanks,need,use,like,sure,",
    "new,good,it's,want,having,don't,i'll,did,able,morning,actually,th,adding,smile,",
    "fine,default,eyes,i've,using,getting,set,check,thank,didn,problem,set,know,",
    "trying,think,looking,running,sorry,needs,info,guys,maybe,bit,that's,point,yeah,",
    "doesn't,anymore,does,tried,used,needed,weird,better,lot,correct,can't,ago,write,",
    "hi,create,following,working,file,created,hootsuite,works,i'm,stuff,type,",
    "checking,thing",
);

/// Where the analysis step reads from and writes to.
#[derive(Debug, Clone)]
pub struct WordCloudTarget {
    pub input_csv: PathBuf,
    pub text_output: PathBuf,
    pub image_output: PathBuf,
}

/// Argument list passed to `kumo`.
#[must_use]
pub fn kumo_args(input_csv: &Path, output_png: &Path) -> Vec<String> {
    vec![
        "--input".to_string(),
        input_csv.display().to_string(),
        "--output".to_string(),
        output_png.display().to_string(),
        "--word-count".to_string(),
        WORD_COUNT.to_string(),
        "--stop-words".to_string(),
        CLOUD_STOP_WORDS.to_string(),
    ]
}

/// Replace `path` with the aggregate text of the run.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub async fn write_analysis_text(
    path: &Path,
    aggregate: &AggregateText,
) -> Result<(), HistoryError> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(aggregate.as_str().as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.flush().await?;

    info!("Wrote analysis text to {}", path.display());
    Ok(())
}

/// Run `kumo` against the exported CSV.
///
/// The generator is an environmental precondition: a missing binary or a failing run is
/// logged and reported as `false` rather than failing the export.
pub async fn render_wordcloud(target: &WordCloudTarget) -> bool {
    let args = kumo_args(&target.input_csv, &target.image_output);

    match Command::new(KUMO_BINARY).args(&args).output().await {
        Ok(output) if output.status.success() => {
            info!("Rendered word cloud to {}", target.image_output.display());
            true
        }
        Ok(output) => {
            warn!(
                "{} exited with {}: {}{}",
                KUMO_BINARY,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
            false
        }
        Err(e) => {
            warn!("Failed to run {}: {}", KUMO_BINARY, e);
            false
        }
    }
}

/// Write the analysis text, then render the cloud.
///
/// # Errors
///
/// Returns an error only if the analysis text cannot be written.
pub async fn run_wordcloud(
    target: &WordCloudTarget,
    aggregate: &AggregateText,
) -> Result<bool, HistoryError> {
    write_analysis_text(&target.text_output, aggregate).await?;
    Ok(render_wordcloud(target).await)
}
