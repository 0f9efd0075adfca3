//! Probe engine: network probing, bounded dispatch and file I/O around the
//! pure core.
mod decode;
mod dispatch;
mod engine;
mod persist;
mod probe;
mod report;
mod source;
mod types;

pub use decode::{decode_text, DecodeError, DecodedText};
pub use dispatch::{
    DispatchReport, Dispatcher, NullProgressSink, ProgressSink, DEFAULT_MAX_CONCURRENCY,
};
pub use engine::{run_reconciliation, EngineError, EngineHandle, RunRequest};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use probe::{probe, probe_detailed, ProbeSettings, Prober, ReqwestProber};
pub use report::{
    render_tsv, write_report, write_summary, RunSummary, DEFAULT_REPORT_FILENAME,
    SUMMARY_FILENAME,
};
pub use source::{load_identifiers, load_mapping, parse_csv_mapping, MappingError, SourceError};
pub use types::{EngineEvent, FailureKind, FailureTally, ProbeFailure, RunReport};
