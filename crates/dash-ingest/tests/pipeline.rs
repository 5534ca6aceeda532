//! End-to-end ingestion tests against real files.

use std::fs;
use std::path::Path;

use dash_ingest::{
    CsvFileRepository, IngestPipeline, JsonFileRepository, LoadOutcome, SurveyCollector,
    TableRepository,
};
use dash_model::{StatusLevel, SurveyResponse};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn pipeline(dir: &Path) -> IngestPipeline<CsvFileRepository, JsonFileRepository> {
    IngestPipeline::new(CsvFileRepository::new(dir), JsonFileRepository::in_dir(dir))
}

fn column_names(outcome: &LoadOutcome) -> Vec<String> {
    outcome
        .frame()
        .expect("loaded frame")
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[test]
fn well_formed_row_source_keeps_header_and_row_count() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("data.csv"),
        "Category,Value\nReading,5\nGaming,10\nCooking,3\n",
    );

    let data = pipeline(dir.path()).run();

    assert_eq!(column_names(&data.rows.outcome), vec!["Category", "Value"]);
    assert_eq!(data.rows.outcome.frame().unwrap().height(), 3);
    assert_eq!(data.rows.status().level, StatusLevel::Success);
}

#[test]
fn missing_and_zero_length_sources_are_absent() {
    let dir = TempDir::new().unwrap();
    let data = pipeline(dir.path()).run();
    assert!(data.rows.outcome.is_absent());
    assert!(data.records.outcome.is_absent());

    write(&dir.path().join("data.csv"), "");
    write(&dir.path().join("data.json"), "");
    let data = pipeline(dir.path()).run();
    assert!(data.rows.outcome.is_absent());
    assert!(data.records.outcome.is_absent());
    assert_eq!(
        data.records.status().message,
        "JSON file not found or empty."
    );
}

#[test]
fn bare_array_and_data_points_produce_identical_tables() {
    let records = r#"[
        {"Song": "A", "Artist": "X", "Overall Rating": 9},
        {"Song": "B", "Artist": "Y", "Overall Rating": 3},
        {"Song": "C", "Artist": "X", "Overall Rating": 7}
    ]"#;

    let bare_dir = TempDir::new().unwrap();
    write(&bare_dir.path().join("data.json"), records);
    let wrapped_dir = TempDir::new().unwrap();
    write(
        &wrapped_dir.path().join("data.json"),
        &format!(r#"{{"data_points": {records}}}"#),
    );

    let bare = JsonFileRepository::in_dir(bare_dir.path()).load().unwrap().frame;
    let wrapped = JsonFileRepository::in_dir(wrapped_dir.path())
        .load()
        .unwrap()
        .frame;

    assert_eq!(bare.height(), 3);
    assert!(bare.equals_missing(&wrapped));
}

#[test]
fn malformed_record_source_does_not_block_row_source() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("data.csv"), "Category,Value\nReading,5\n");
    write(&dir.path().join("data.json"), "{\"data_points\": [");

    let data = pipeline(dir.path()).run();

    assert!(data.rows.outcome.is_loaded());
    let LoadOutcome::LoadError { message } = &data.records.outcome else {
        panic!("expected the record source to fail");
    };
    assert!(message.starts_with("failed to parse JSON"));
    assert_eq!(data.records.status().level, StatusLevel::Error);
}

#[test]
fn malformed_row_source_is_load_error_with_message() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("data.csv"), "Category,Value\nReading,5,7\n");

    let data = pipeline(dir.path()).run();

    let LoadOutcome::LoadError { message } = &data.rows.outcome else {
        panic!("expected the row source to fail");
    };
    assert!(message.ends_with("Expected 2 fields in line 2, saw 3"));
}

#[test]
fn survey_append_adds_one_row_to_headed_file() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("data.csv"), "Category,Value\nReading,5\n");

    let mut collector = SurveyCollector::new(CsvFileRepository::new(dir.path()));
    collector
        .submit(&SurveyResponse::new("Gaming", "10"))
        .unwrap();

    let current = collector.current();
    let frame = current.outcome.frame().unwrap();
    assert_eq!(frame.height(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("data.csv")).unwrap(),
        "Category,Value\nReading,5\nGaming,10\n"
    );
}

#[test]
fn survey_append_after_hand_edited_file_stays_loadable() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("data.csv"), "Category,Value\nReading,5");

    let mut collector = SurveyCollector::new(CsvFileRepository::new(dir.path()));
    collector
        .submit(&SurveyResponse::new("Gaming", "10"))
        .unwrap();

    let current = collector.current();
    assert_eq!(current.outcome.frame().map(|df| df.height()), Some(2));
}

#[test]
fn first_submission_without_header_becomes_column_names() {
    let dir = TempDir::new().unwrap();
    let mut collector = SurveyCollector::new(CsvFileRepository::new(dir.path()));

    collector
        .submit(&SurveyResponse::new("Reading", "5"))
        .unwrap();
    collector
        .submit(&SurveyResponse::new("Gaming", "10"))
        .unwrap();

    let current = collector.current();
    assert_eq!(column_names(&current.outcome), vec!["Reading", "5"]);
    assert_eq!(current.outcome.frame().unwrap().height(), 1);
}

#[test]
fn configured_header_is_written_on_creation() {
    let dir = TempDir::new().unwrap();
    let repository = CsvFileRepository::new(dir.path())
        .with_header(Some(vec!["Category".to_string(), "Value".to_string()]));
    let mut collector = SurveyCollector::new(repository);

    collector
        .submit(&SurveyResponse::new("Reading", "5"))
        .unwrap();

    let current = collector.current();
    assert_eq!(column_names(&current.outcome), vec!["Category", "Value"]);
    assert_eq!(current.outcome.frame().unwrap().height(), 1);
}
