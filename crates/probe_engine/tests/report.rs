use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use probe_core::{MatchRecord, Reconciliation};
use probe_engine::{
    render_tsv, write_report, write_summary, AtomicFileWriter, FailureTally, PersistError,
    RunSummary, SUMMARY_FILENAME,
};
use tempfile::TempDir;

fn sample() -> Reconciliation {
    Reconciliation {
        records: vec![
            MatchRecord {
                identifier: 10,
                label: Some("Smith".to_string()),
            },
            MatchRecord {
                identifier: 20,
                label: None,
            },
        ],
        missing_labels: 1,
    }
}

#[test]
fn tsv_has_header_and_empty_cell_for_missing_label() {
    assert_eq!(render_tsv(&sample()), "ID\tLabel\n10\tSmith\n20\t\n");
}

#[test]
fn tsv_keeps_columns_aligned_when_labels_contain_tabs() {
    let reconciliation = Reconciliation {
        records: vec![MatchRecord {
            identifier: 1,
            label: Some("Van\tDijk\n".to_string()),
        }],
        missing_labels: 0,
    };
    assert_eq!(render_tsv(&reconciliation), "ID\tLabel\n1\tVan Dijk \n");
}

#[test]
fn report_is_written_into_a_fresh_directory() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("output");

    let path = write_report(&out, "matched_ids.txt", &sample()).unwrap();

    assert_eq!(path, out.join("matched_ids.txt"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "ID\tLabel\n10\tSmith\n20\t\n"
    );
}

#[test]
fn rewriting_a_report_replaces_it() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write("report.txt", b"old").unwrap();
    let second = writer.write("report.txt", b"new").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "new");
}

#[test]
fn file_names_with_directories_are_refused() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let err = writer.write("../escape.txt", b"x").unwrap_err();
    assert!(matches!(err, PersistError::InvalidFilename(_)));
    assert!(!temp.path().join("../escape.txt").exists());
}

#[test]
fn output_dir_that_is_a_file_leaves_nothing_behind() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let result = write_report(&file_path, "matched_ids.txt", &sample());
    assert!(matches!(result, Err(PersistError::OutputDir(_))));
    assert!(!temp.path().join("matched_ids.txt").exists());
}

#[test]
fn summary_is_written_as_json() {
    let temp = TempDir::new().unwrap();
    let mut failures = FailureTally::default();
    failures.timeout = 3;
    let summary = RunSummary {
        generated_utc: "2024-01-01T00:00:00Z".to_string(),
        url_template: "https://assets.test/p???.eaz".to_string(),
        total: 10,
        matched: 2,
        missing_labels: 1,
        failures,
        elapsed_ms: Duration::from_millis(1500).as_millis(),
    };

    let path = write_summary(temp.path(), &summary).unwrap();
    assert_eq!(path.file_name().unwrap(), SUMMARY_FILENAME);

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["matched"], 2);
    assert_eq!(value["missing_labels"], 1);
    assert_eq!(value["failures"]["timeout"], 3);
    assert_eq!(value["url_template"], "https://assets.test/p???.eaz");
}
