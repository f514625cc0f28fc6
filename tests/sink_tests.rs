use chrono::{TimeZone, Utc};
use slack_history::core::models::MessageRecord;
use slack_history::sink::CsvSink;

fn record(text: &str) -> MessageRecord {
    MessageRecord {
        timestamp: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
        user: "U123".to_string(),
        text: text.to_string(),
    }
}

#[test]
fn test_header_written_on_creation() {
    let sink = CsvSink::new(Vec::new()).unwrap();
    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();

    assert_eq!(output, "timestamp,user,message\n");
}

#[test]
fn test_record_row_format() {
    let mut sink = CsvSink::new(Vec::new()).unwrap();
    sink.write_record(&record("deploy finished")).unwrap();

    assert_eq!(sink.rows(), 1);
    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(
        output,
        "timestamp,user,message\n2020-01-01T00:00:00Z,U123,deploy finished\n"
    );
}

#[test]
fn test_commas_and_quotes_are_escaped() {
    let mut sink = CsvSink::new(Vec::new()).unwrap();
    sink.write_record(&record(r#"ship it, then say "done""#)).unwrap();

    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert!(output.ends_with("U123,\"ship it, then say \"\"done\"\"\"\n"));
}

#[test]
fn test_missing_timestamp_leaves_field_empty() {
    let mut sink = CsvSink::new(Vec::new()).unwrap();
    let mut rec = record("no time");
    rec.timestamp = None;
    sink.write_record(&rec).unwrap();

    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert!(output.ends_with("\n,U123,no time\n"));
}

#[test]
fn test_create_truncates_existing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("output.csv");
    std::fs::write(&path, "stale contents\nfrom a previous run\n").unwrap();

    let mut sink = CsvSink::create(&path).unwrap();
    sink.write_record(&record("fresh")).unwrap();

    // flushed per record, so readable before the sink is dropped
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        on_disk,
        "timestamp,user,message\n2020-01-01T00:00:00Z,U123,fresh\n"
    );
}

#[test]
fn test_create_fails_for_missing_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("output.csv");

    let err = CsvSink::create(&path).err().expect("should fail");
    assert!(err.to_string().contains("cannot create file"));
}
