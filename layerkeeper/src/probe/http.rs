//! HTTP implementation of the version probe.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{ProbeError, ProbeResult, VersionProbe};

/// Default probe timeout (10 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Expected body of the workload's version endpoint.
#[derive(Debug, Deserialize)]
struct VersionBody {
    version: String,
}

/// HTTP-based implementation of [`VersionProbe`].
///
/// Issues a bounded-time GET against `http://localhost:{port}/version` and
/// expects a JSON body of the form `{"version": "..."}`.
#[derive(Clone)]
pub struct HttpVersionProbe {
    client: Client,
    timeout: Duration,
}

impl std::fmt::Debug for HttpVersionProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpVersionProbe")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for HttpVersionProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpVersionProbe {
    /// Create a probe with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a probe with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("LayerKeeper/1.0")
            .build()
            .expect("failed to create HTTP client");

        Self { client, timeout }
    }
}

impl VersionProbe for HttpVersionProbe {
    fn fetch_version(&self, port: u16) -> ProbeResult<String> {
        let url = format!("http://localhost:{}/version", port);

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout(self.timeout.as_secs())
            } else {
                ProbeError::Http(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(ProbeError::Http(format!(
                "HTTP {} for {}",
                response.status(),
                url
            )));
        }

        let body: VersionBody = response
            .json()
            .map_err(|e| ProbeError::MalformedBody(e.to_string()))?;

        Ok(body.version)
    }
}
