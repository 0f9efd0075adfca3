use std::collections::HashSet;

use crate::{Identifier, ProgressCadence, ProgressState};

/// Result of one existence check. Every failure mode is `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    Present,
    Absent,
}

impl ProbeOutcome {
    pub fn is_present(self) -> bool {
        matches!(self, ProbeOutcome::Present)
    }
}

impl From<bool> for ProbeOutcome {
    fn from(present: bool) -> Self {
        if present {
            ProbeOutcome::Present
        } else {
            ProbeOutcome::Absent
        }
    }
}

/// Accumulated state of one dispatch run, owned by a single collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    present: HashSet<Identifier>,
    progress: ProgressState,
    cadence: ProgressCadence,
}

impl RunState {
    pub fn new(total: usize, cadence: ProgressCadence) -> Self {
        Self {
            present: HashSet::new(),
            progress: ProgressState::new(total),
            cadence,
        }
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn cadence(&self) -> ProgressCadence {
        self.cadence
    }

    pub fn present(&self) -> &HashSet<Identifier> {
        &self.present
    }

    pub fn present_count(&self) -> usize {
        self.present.len()
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    pub fn into_present(self) -> HashSet<Identifier> {
        self.present
    }

    pub(crate) fn apply_completion(&mut self, identifier: Identifier, outcome: ProbeOutcome) {
        if outcome.is_present() {
            self.present.insert(identifier);
        }
        self.progress.advance();
    }
}
