use std::fmt;
use std::time::Duration;

use probe_core::{ProgressState, Reconciliation};
use serde::Serialize;

use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(ProgressState),
    Finished(Result<RunReport, EngineError>),
}

/// Everything a finished run hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub reconciliation: Reconciliation,
    pub failures: FailureTally,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ProbeFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Why a probe came back absent. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Connect,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Connect => write!(f, "connection failed"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Per-kind counts of absent outcomes that came from a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FailureTally {
    pub invalid_url: usize,
    pub http_status: usize,
    pub timeout: usize,
    pub connect: usize,
    pub network: usize,
}

impl FailureTally {
    pub fn record(&mut self, kind: FailureKind) {
        match kind {
            FailureKind::InvalidUrl => self.invalid_url += 1,
            FailureKind::HttpStatus(_) => self.http_status += 1,
            FailureKind::Timeout => self.timeout += 1,
            FailureKind::Connect => self.connect += 1,
            FailureKind::Network => self.network += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.invalid_url + self.http_status + self.timeout + self.connect + self.network
    }
}

impl fmt::Display for FailureTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "http_status={} timeout={} connect={} network={} invalid_url={}",
            self.http_status, self.timeout, self.connect, self.network, self.invalid_url
        )
    }
}
