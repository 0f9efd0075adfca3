use std::path::{Path, PathBuf};

use probe_core::Reconciliation;
use serde::Serialize;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::FailureTally;

pub const DEFAULT_REPORT_FILENAME: &str = "matched_ids.txt";
pub const SUMMARY_FILENAME: &str = "summary.json";

const HEADER: [&str; 2] = ["ID", "Label"];

/// Tab-separated table of matched identifiers. A missing label is an empty
/// cell.
pub fn render_tsv(reconciliation: &Reconciliation) -> String {
    let mut buffer = String::with_capacity(16 * (reconciliation.records.len() + 1));
    buffer.push_str(&HEADER.join("\t"));
    buffer.push('\n');
    for record in &reconciliation.records {
        buffer.push_str(&record.identifier.to_string());
        buffer.push('\t');
        if let Some(label) = &record.label {
            buffer.push_str(&sanitize_cell(label));
        }
        buffer.push('\n');
    }
    buffer
}

// Tabs or newlines inside a label would shift columns.
fn sanitize_cell(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

pub fn write_report(
    dir: &Path,
    filename: &str,
    reconciliation: &Reconciliation,
) -> Result<PathBuf, PersistError> {
    let writer = AtomicFileWriter::new(dir);
    writer.write(filename, render_tsv(reconciliation).as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub generated_utc: String,
    pub url_template: String,
    pub total: usize,
    pub matched: usize,
    pub missing_labels: usize,
    pub failures: FailureTally,
    pub elapsed_ms: u128,
}

pub fn write_summary(dir: &Path, summary: &RunSummary) -> Result<PathBuf, PersistError> {
    let content = serde_json::to_string_pretty(summary)
        .map_err(|err| PersistError::Io(err.into()))?;
    AtomicFileWriter::new(dir).write(SUMMARY_FILENAME, content.as_bytes())
}
