//! Online multinomial naive Bayes used by the post-export analysis demo
//!
//! Training data arrives over a channel so a producer task can feed the model while it learns.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::errors::HistoryError;

/// Capacity of the training stream.
pub const STREAM_CAPACITY: usize = 100;

/// Canned training sentences and their classes (1 = positive, 0 = negative).
pub const DEMO_SAMPLES: [(&str, usize); 3] = [
    ("I love the city", 1),
    ("I hate Los Angeles", 0),
    ("My mother is not a nice lady", 0),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDatapoint {
    pub x: String,
    pub y: usize,
}

impl TextDatapoint {
    pub fn new(x: impl Into<String>, y: usize) -> Self {
        Self { x: x.into(), y }
    }
}

/// Keep letters, digits and spaces, lowercased.
#[must_use]
pub fn only_words_and_numbers(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(only_words_and_numbers).filter(|w| !w.is_empty())
}

#[derive(Debug, Clone)]
pub struct NaiveBayes {
    classes: usize,
    documents: Vec<u64>,
    words_in_class: Vec<u64>,
    word_counts: HashMap<String, Vec<u64>>,
}

impl NaiveBayes {
    #[must_use]
    pub fn new(classes: usize) -> Self {
        Self {
            classes,
            documents: vec![0; classes],
            words_in_class: vec![0; classes],
            word_counts: HashMap::new(),
        }
    }

    #[must_use]
    pub fn classes(&self) -> usize {
        self.classes
    }

    #[must_use]
    pub fn documents_seen(&self) -> u64 {
        self.documents.iter().sum()
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.word_counts.len()
    }

    /// # Errors
    ///
    /// Returns an error if the datapoint's class is outside `0..classes`.
    pub fn learn(&mut self, point: &TextDatapoint) -> Result<(), HistoryError> {
        if point.y >= self.classes {
            return Err(HistoryError::GeneralError(format!(
                "class {} out of range for {} classes",
                point.y, self.classes
            )));
        }

        let classes = self.classes;
        self.documents[point.y] += 1;
        for word in tokenize(&point.x) {
            let counts = self
                .word_counts
                .entry(word)
                .or_insert_with(|| vec![0; classes]);
            counts[point.y] += 1;
            self.words_in_class[point.y] += 1;
        }

        Ok(())
    }

    /// Most likely class for `text`. Words never seen in training are ignored.
    #[must_use]
    pub fn predict(&self, text: &str) -> usize {
        let total_docs = self.documents_seen();
        if total_docs == 0 {
            return 0;
        }

        #[allow(clippy::cast_precision_loss)]
        let vocab = self.word_counts.len() as f64;
        let words: Vec<String> = tokenize(text).collect();

        let mut best = (0, f64::NEG_INFINITY);
        for class in 0..self.classes {
            if self.documents[class] == 0 {
                continue;
            }

            #[allow(clippy::cast_precision_loss)]
            let mut score = (self.documents[class] as f64 / total_docs as f64).ln();
            #[allow(clippy::cast_precision_loss)]
            let denom = self.words_in_class[class] as f64 + vocab;

            for word in &words {
                if let Some(counts) = self.word_counts.get(word) {
                    #[allow(clippy::cast_precision_loss)]
                    let numer = counts[class] as f64 + 1.0;
                    score += (numer / denom).ln();
                }
            }

            if score > best.1 {
                best = (class, score);
            }
        }

        best.0
    }

    /// Learn from `stream` until every sender is dropped.
    ///
    /// Bad datapoints are logged and skipped; the count of rejected points is returned
    /// alongside the model.
    pub async fn online_learn(
        classes: usize,
        mut stream: mpsc::Receiver<TextDatapoint>,
    ) -> (Self, usize) {
        let mut model = Self::new(classes);
        let mut rejected = 0;

        while let Some(point) = stream.recv().await {
            if let Err(e) = model.learn(&point) {
                warn!("Error passed: {}", e);
                rejected += 1;
            }
        }

        (model, rejected)
    }
}

/// Train a two-class model on the canned demo sentences.
///
/// # Errors
///
/// Returns an error if the producer task panics.
pub async fn train_demo() -> Result<NaiveBayes, HistoryError> {
    let (tx, rx) = mpsc::channel(STREAM_CAPACITY);

    let producer = tokio::spawn(async move {
        for (x, y) in DEMO_SAMPLES {
            if tx.send(TextDatapoint::new(x, y)).await.is_err() {
                break;
            }
        }
    });

    let (model, rejected) = NaiveBayes::online_learn(2, rx).await;
    producer
        .await
        .map_err(|e| HistoryError::GeneralError(format!("training producer failed: {e}")))?;

    info!(
        "Trained demo classifier on {} documents ({} rejected)",
        model.documents_seen(),
        rejected
    );
    Ok(model)
}
