use slack_history::classifier::{
    DEMO_SAMPLES, NaiveBayes, TextDatapoint, only_words_and_numbers, train_demo,
};
use tokio::sync::mpsc;

#[test]
fn test_only_words_and_numbers() {
    assert_eq!(only_words_and_numbers("Hello, World 42!"), "hello world 42");
}

#[test]
fn test_learn_rejects_unknown_class() {
    let mut model = NaiveBayes::new(2);
    assert!(model.learn(&TextDatapoint::new("text", 2)).is_err());
    assert_eq!(model.documents_seen(), 0);
}

#[test]
fn test_untrained_model_predicts_zero() {
    let model = NaiveBayes::new(2);
    assert_eq!(model.predict("anything"), 0);
}

#[tokio::test]
async fn test_train_demo_learns_all_samples() {
    let model = train_demo().await.unwrap();

    assert_eq!(model.classes(), 2);
    assert_eq!(model.documents_seen(), DEMO_SAMPLES.len() as u64);
    assert_eq!(model.vocabulary_size(), 14);
    assert_eq!(model.predict("I love the city"), 1);
    assert_eq!(model.predict("I hate Los Angeles"), 0);
}

#[tokio::test]
async fn test_online_learn_counts_rejected_points() {
    let (tx, rx) = mpsc::channel(4);
    tx.send(TextDatapoint::new("good", 1)).await.unwrap();
    tx.send(TextDatapoint::new("bad class", 7)).await.unwrap();
    drop(tx);

    let (model, rejected) = NaiveBayes::online_learn(2, rx).await;
    assert_eq!(rejected, 1);
    assert_eq!(model.documents_seen(), 1);
}
