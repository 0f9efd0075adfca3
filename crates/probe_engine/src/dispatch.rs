use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::join_all;
use probe_core::{
    update, Effect, Identifier, Msg, ProbeOutcome, ProgressCadence, ProgressState, RunState,
    UrlTemplate,
};
use probe_logging::{probe_debug, probe_error, probe_info};
use tokio::sync::mpsc;

use crate::probe::{probe_detailed, Prober};
use crate::{FailureKind, FailureTally};

/// Default upper bound on simultaneously in-flight probes.
pub const DEFAULT_MAX_CONCURRENCY: usize = 700;

/// Receives progress snapshots from a run. Called from the collector only.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: ProgressState);
}

/// Sink that discards everything.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _progress: ProgressState) {}
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressState) + Send + Sync,
{
    fn emit(&self, progress: ProgressState) {
        self(progress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchReport {
    pub present: HashSet<Identifier>,
    pub failures: FailureTally,
}

struct Completion {
    identifier: Identifier,
    failure: Option<FailureKind>,
}

/// Bounded-concurrency driver for one batch of probes.
pub struct Dispatcher {
    prober: Arc<dyn Prober>,
    max_concurrency: usize,
    cadence: ProgressCadence,
}

impl Dispatcher {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            cadence: ProgressCadence::default(),
        }
    }

    /// Zero is treated as one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_cadence(mut self, cadence: ProgressCadence) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Probe every identifier once and return the ones that are present.
    ///
    /// Must run inside a tokio runtime. Workers pull from a shared cursor
    /// and report to this task over a channel; only this task touches the
    /// run state, so the present set and progress counter have a single
    /// writer.
    pub async fn run_all(
        &self,
        identifiers: &[Identifier],
        template: &UrlTemplate,
        sink: &dyn ProgressSink,
    ) -> DispatchReport {
        let total = identifiers.len();
        if total == 0 {
            sink.emit(ProgressState::new(0));
            return DispatchReport::default();
        }

        let worker_count = self.max_concurrency.min(total);
        probe_info!(
            "Dispatching {} probes with {} workers template={}",
            total,
            worker_count,
            template
        );

        let queue: Arc<[Identifier]> = Arc::from(identifiers);
        let cursor = Arc::new(AtomicUsize::new(0));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

        let workers: Vec<_> = (0..worker_count)
            .map(|_| {
                let queue = queue.clone();
                let cursor = cursor.clone();
                let prober = self.prober.clone();
                let template = template.clone();
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    loop {
                        let index = cursor.fetch_add(1, Ordering::Relaxed);
                        let Some(&identifier) = queue.get(index) else {
                            break;
                        };
                        let failure = probe_detailed(prober.as_ref(), identifier, &template)
                            .await
                            .err()
                            .map(|failure| failure.kind);
                        if done_tx
                            .send(Completion {
                                identifier,
                                failure,
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                })
            })
            .collect();
        // The channel closes once every worker has dropped its sender.
        drop(done_tx);

        let mut state = RunState::new(total, self.cadence);
        let mut failures = FailureTally::default();
        while let Some(completion) = done_rx.recv().await {
            if let Some(kind) = completion.failure {
                failures.record(kind);
            }
            let outcome = ProbeOutcome::from(completion.failure.is_none());
            let (next, effects) = update(
                state,
                Msg::ProbeCompleted {
                    identifier: completion.identifier,
                    outcome,
                },
            );
            state = next;
            for effect in effects {
                match effect {
                    Effect::EmitProgress(progress) => sink.emit(progress),
                    Effect::RunComplete => {
                        probe_debug!("All {} probes reported", total);
                    }
                }
            }
        }

        for joined in join_all(workers).await {
            if let Err(err) = joined {
                probe_error!("Probe worker terminated abnormally: {}", err);
            }
        }

        let progress = state.progress();
        if !state.is_complete() {
            probe_error!(
                "Run ended with {} of {} probes reported",
                progress.processed,
                progress.total
            );
        }
        probe_info!(
            "Probing finished: {} present, {} absent, failures [{}]",
            state.present_count(),
            progress.processed - state.present_count(),
            failures
        );

        DispatchReport {
            present: state.into_present(),
            failures,
        }
    }
}
