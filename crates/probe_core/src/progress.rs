/// How many completions pass between two progress events.
pub const DEFAULT_PROGRESS_EVERY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    pub processed: usize,
    pub total: usize,
}

impl ProgressState {
    pub fn new(total: usize) -> Self {
        Self { processed: 0, total }
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }

    /// Completed share in `0.0..=1.0`; an empty run counts as done.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }

    pub(crate) fn advance(&mut self) {
        if self.processed < self.total {
            self.processed += 1;
        }
    }
}

/// Throttle for progress events: every `every` completions and always on the
/// last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressCadence {
    every: usize,
}

impl ProgressCadence {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }

    pub fn every(&self) -> usize {
        self.every
    }

    pub fn should_emit(&self, progress: &ProgressState) -> bool {
        progress.is_complete() || (progress.processed > 0 && progress.processed % self.every == 0)
    }
}

impl Default for ProgressCadence {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_EVERY)
    }
}
