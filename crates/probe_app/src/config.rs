//! Run configuration: RON file defaults overridden by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use probe_core::{DEFAULT_PROGRESS_EVERY, DEFAULT_URL_TEMPLATE};
use probe_engine::{ProbeSettings, DEFAULT_MAX_CONCURRENCY, DEFAULT_REPORT_FILENAME};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub url_template: String,
    pub max_concurrency: usize,
    pub progress_every: usize,
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub output_dir: PathBuf,
    pub output_filename: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            progress_every: DEFAULT_PROGRESS_EVERY,
            timeout_ms: 2000,
            connect_timeout_ms: 2000,
            output_dir: PathBuf::from("output"),
            output_filename: DEFAULT_REPORT_FILENAME.to_string(),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url_template: Option<String>,
    pub max_concurrency: Option<usize>,
    pub progress_every: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load from `path`, or defaults when no path is given. A path that was
    /// asked for but cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        ron::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(template) = overrides.url_template {
            self.url_template = template;
        }
        if let Some(max_concurrency) = overrides.max_concurrency {
            self.max_concurrency = max_concurrency;
        }
        if let Some(every) = overrides.progress_every {
            self.progress_every = every;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.timeout_ms),
            ..ProbeSettings::default()
        }
    }
}
