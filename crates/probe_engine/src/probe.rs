use std::time::Duration;

use probe_core::{Identifier, ProbeOutcome, UrlTemplate};
use probe_logging::probe_trace;

use crate::{EngineError, FailureKind, ProbeFailure};

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Idle keep-alive connections retained per host between probes.
    pub pool_idle_per_host: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(2),
            pool_idle_per_host: 64,
        }
    }
}

/// A single lightweight existence check against a concrete URL.
///
/// `Ok(())` means the resource exists. Implementations must not panic on
/// network trouble; every failure comes back as a `ProbeFailure`.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn check(&self, url: &str) -> Result<(), ProbeFailure>;
}

/// Probe one identifier and keep the failure detail.
pub async fn probe_detailed(
    prober: &dyn Prober,
    identifier: Identifier,
    template: &UrlTemplate,
) -> Result<(), ProbeFailure> {
    let url = template.expand(identifier);
    let result = prober.check(&url).await;
    if let Err(failure) = &result {
        probe_trace!(
            "probe id={} url={} absent: {} ({})",
            identifier,
            url,
            failure.kind,
            failure.message
        );
    }
    result
}

/// Probe one identifier. Failures collapse to `Absent`.
pub async fn probe(
    prober: &dyn Prober,
    identifier: Identifier,
    template: &UrlTemplate,
) -> ProbeOutcome {
    ProbeOutcome::from(probe_detailed(prober, identifier, template).await.is_ok())
}

/// HEAD-request prober sharing one connection pool across all probes.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    pub fn new(settings: &ProbeSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(settings.pool_idle_per_host)
            .build()
            .map_err(|err| EngineError::ClientBuild(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn check(&self, url: &str) -> Result<(), ProbeFailure> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| ProbeFailure::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .head(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        // Only 200 counts as present.
        if status == reqwest::StatusCode::OK {
            Ok(())
        } else {
            Err(ProbeFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ))
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProbeFailure {
    if err.is_timeout() {
        return ProbeFailure::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return ProbeFailure::new(FailureKind::Connect, err.to_string());
    }
    if err.is_builder() {
        return ProbeFailure::new(FailureKind::InvalidUrl, err.to_string());
    }
    ProbeFailure::new(FailureKind::Network, err.to_string())
}
