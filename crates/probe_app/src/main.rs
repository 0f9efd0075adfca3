//! Command-line front end: check which identifiers have a remote resource and
//! label the matches from a mapping file.

mod config;
mod display;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use probe_core::{ProgressCadence, UrlTemplate};
use probe_engine::{
    load_identifiers, load_mapping, write_report, write_summary, EngineEvent, EngineHandle,
    RunRequest, RunSummary,
};
use probe_logging::{probe_error, probe_info, probe_warn, LogDestination, DEFAULT_LOG_FILE};

use crate::config::{AppConfig, Overrides};
use crate::display::ProgressLine;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Probe a remote server for identifier resources and label the matches")]
struct Args {
    /// Newline-delimited list of numeric identifiers.
    ids: PathBuf,

    /// Mapping file (CSV, XLS, XLSX or ODS); column one is the ID, column two the label.
    mapping: PathBuf,

    /// RON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL template; `???` is replaced by the identifier.
    #[arg(long)]
    template: Option<String>,

    /// Maximum number of probes in flight at once.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-probe timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Completions between progress updates.
    #[arg(long)]
    progress_every: Option<usize>,

    /// Directory for the report and summary.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    log: LogTarget,

    /// Log debug detail (twice for per-probe trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    probe_logging::initialize(args.log.into(), level, Path::new(DEFAULT_LOG_FILE));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            probe_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?.apply(Overrides {
        url_template: args.template,
        max_concurrency: args.concurrency,
        progress_every: args.progress_every,
        timeout_ms: args.timeout_ms,
        output_dir: args.output_dir,
    });

    let identifiers = load_identifiers(&args.ids).context("loading identifiers")?;
    println!("Identifiers to check: {}", identifiers.len());

    // A broken mapping file stops the run before any probe is sent.
    let mapping = load_mapping(&args.mapping).context("loading mapping")?;
    display::print_mapping_preview(&mapping);

    let template = UrlTemplate::new(config.url_template.clone());
    if !template.has_placeholder() {
        probe_warn!(
            "URL template has no placeholder; every identifier probes {}",
            template
        );
    }
    if let Err(err) = template.sample_url() {
        probe_warn!("URL template does not form a valid URL ({}); all probes will be absent", err);
    }

    if config.max_concurrency == 0 {
        probe_warn!("max_concurrency 0 is not usable; running with 1");
    }
    let mut request = RunRequest::new(identifiers, template.clone(), Arc::new(mapping));
    request.max_concurrency = config.max_concurrency.max(1);
    request.cadence = ProgressCadence::new(config.progress_every);

    let handle = EngineHandle::spawn(request, config.probe_settings());
    let mut progress_line = ProgressLine::new();
    let report = loop {
        match handle.recv() {
            Some(EngineEvent::Progress(progress)) => progress_line.update(progress),
            Some(EngineEvent::Finished(result)) => break result?,
            None => anyhow::bail!("engine stopped without reporting a result"),
        }
    };
    progress_line.finish();

    let reconciliation = &report.reconciliation;
    if reconciliation.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    if reconciliation.missing_labels > 0 {
        println!(
            "Warning: no label found for {} IDs. Check the ID format in the mapping file.",
            reconciliation.missing_labels
        );
    }
    println!("Check complete. Matches found:");
    display::print_table(reconciliation);

    let report_path = write_report(&config.output_dir, &config.output_filename, reconciliation)
        .context("writing report")?;
    let summary = RunSummary {
        generated_utc: Utc::now().to_rfc3339(),
        url_template: template.to_string(),
        total: report.total,
        matched: reconciliation.matched(),
        missing_labels: reconciliation.missing_labels,
        failures: report.failures,
        elapsed_ms: report.elapsed.as_millis(),
    };
    let summary_path = write_summary(&config.output_dir, &summary).context("writing summary")?;

    probe_info!(
        "Wrote {:?} and {:?} in {:.1}s",
        report_path,
        summary_path,
        report.elapsed.as_secs_f64()
    );
    println!("Report saved to {}", report_path.display());
    Ok(())
}
