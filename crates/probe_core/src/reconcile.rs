use std::collections::HashSet;

use crate::{Identifier, Mapping};

/// One output row: a present identifier and its label, if the mapping has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub identifier: Identifier,
    pub label: Option<String>,
}

impl MatchRecord {
    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Sorted by ascending identifier.
    pub records: Vec<MatchRecord>,
    pub missing_labels: usize,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn matched(&self) -> usize {
        self.records.len()
    }

    pub fn missing(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|record| !record.has_label())
    }
}

/// Attach labels to the present identifiers.
///
/// Output order is ascending identifier value, so it does not depend on the
/// order in which probes completed.
pub fn reconcile(present: &HashSet<Identifier>, mapping: &Mapping) -> Reconciliation {
    let mut identifiers: Vec<Identifier> = present.iter().copied().collect();
    identifiers.sort_unstable();

    let mut missing_labels = 0;
    let records = identifiers
        .into_iter()
        .map(|identifier| {
            let label = mapping.label_for(identifier).map(str::to_owned);
            if label.is_none() {
                missing_labels += 1;
            }
            MatchRecord { identifier, label }
        })
        .collect();

    Reconciliation {
        records,
        missing_labels,
    }
}
