use std::io::{self, Write};

use probe_core::{Mapping, ProgressState, Reconciliation};

const PREVIEW_ROWS: usize = 5;
const BAR_WIDTH: usize = 30;

/// Single-line progress bar on stderr, redrawn in place.
#[derive(Debug, Default)]
pub struct ProgressLine {
    drawn: bool,
}

impl ProgressLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, progress: ProgressState) {
        let filled = (progress.fraction() * BAR_WIDTH as f64).round() as usize;
        let mut stderr = io::stderr().lock();
        let _ = write!(
            stderr,
            "\r[{}{}] Processed {} of {} IDs",
            "#".repeat(filled.min(BAR_WIDTH)),
            " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
            progress.processed,
            progress.total
        );
        let _ = stderr.flush();
        self.drawn = true;
    }

    pub fn finish(&mut self) {
        if self.drawn {
            eprintln!();
            self.drawn = false;
        }
    }
}

pub fn print_mapping_preview(mapping: &Mapping) {
    println!("Sample of ID to label entries ({} total):", mapping.len());
    for (key, label) in mapping.preview(PREVIEW_ROWS) {
        println!("  {key:>10}  {label}");
    }
}

pub fn print_table(reconciliation: &Reconciliation) {
    let width = reconciliation
        .records
        .iter()
        .map(|record| record.identifier.to_string().len())
        .max()
        .unwrap_or(0)
        .max(2);
    println!("{:>width$}  Label", "ID");
    for record in &reconciliation.records {
        println!(
            "{:>width$}  {}",
            record.identifier,
            record.label.as_deref().unwrap_or("<missing>")
        );
    }
}
