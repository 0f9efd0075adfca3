use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use probe_core::{reconcile, Identifier, Mapping, ProgressCadence, ProgressState, UrlTemplate};
use probe_logging::{probe_error, probe_info, probe_warn};

use crate::dispatch::{Dispatcher, ProgressSink, DEFAULT_MAX_CONCURRENCY};
use crate::probe::{ProbeSettings, Prober, ReqwestProber};
use crate::{EngineEvent, RunReport};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(String),
}

/// Inputs for one reconciliation run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub identifiers: Vec<Identifier>,
    pub template: UrlTemplate,
    pub mapping: Arc<Mapping>,
    pub max_concurrency: usize,
    pub cadence: ProgressCadence,
}

impl RunRequest {
    pub fn new(identifiers: Vec<Identifier>, template: UrlTemplate, mapping: Arc<Mapping>) -> Self {
        Self {
            identifiers,
            template,
            mapping,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            cadence: ProgressCadence::default(),
        }
    }
}

/// Probe all identifiers, then attach labels to the present ones.
pub async fn run_reconciliation(
    prober: Arc<dyn Prober>,
    request: &RunRequest,
    sink: &dyn ProgressSink,
) -> RunReport {
    let started = Instant::now();
    let dispatcher = Dispatcher::new(prober)
        .with_max_concurrency(request.max_concurrency)
        .with_cadence(request.cadence);

    let dispatched = dispatcher
        .run_all(&request.identifiers, &request.template, sink)
        .await;
    let reconciliation = reconcile(&dispatched.present, &request.mapping);

    if reconciliation.is_empty() {
        probe_warn!("No matches found among {} identifiers", request.identifiers.len());
    } else if reconciliation.missing_labels > 0 {
        probe_warn!(
            "No label found for {} of {} matched identifiers; check the ID format in the mapping file",
            reconciliation.missing_labels,
            reconciliation.matched()
        );
    }

    RunReport {
        total: request.identifiers.len(),
        reconciliation,
        failures: dispatched.failures,
        elapsed: started.elapsed(),
    }
}

struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, progress: ProgressState) {
        let _ = self.tx.send(EngineEvent::Progress(progress));
    }
}

/// Runs one reconciliation on a background thread with its own runtime.
pub struct EngineHandle {
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn spawn(request: RunRequest, settings: ProbeSettings) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let result = run_blocking(&request, &settings, &event_tx);
            if let Err(err) = &result {
                probe_error!("Reconciliation run failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::Finished(result));
        });

        Self {
            event_rx,
            worker: Some(worker),
        }
    }

    /// Block until the next event. `None` once the run has finished and all
    /// events were drained.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                probe_error!("Engine thread panicked");
            }
        }
    }
}

fn run_blocking(
    request: &RunRequest,
    settings: &ProbeSettings,
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Result<RunReport, EngineError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| EngineError::Runtime(err.to_string()))?;
    let prober: Arc<dyn Prober> = Arc::new(ReqwestProber::new(settings)?);
    let sink = ChannelProgressSink {
        tx: event_tx.clone(),
    };

    probe_info!(
        "Starting run: {} identifiers, max_concurrency={}, timeout={:?}",
        request.identifiers.len(),
        request.max_concurrency,
        settings.request_timeout
    );
    Ok(runtime.block_on(run_reconciliation(prober, request, &sink)))
}
