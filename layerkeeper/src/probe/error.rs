//! Version-probe error types.

use thiserror::Error;

/// Errors that can occur while probing the workload's version endpoint.
///
/// None of these ever abort a reconciliation; the controller logs them and
/// falls back to an empty version string.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request did not complete within the probe timeout.
    #[error("version request timed out after {0} seconds")]
    Timeout(u64),

    /// The request failed or returned a non-success status.
    #[error("version request failed: {0}")]
    Http(String),

    /// The response body was not the expected JSON document.
    #[error("version response is malformed: {0}")]
    MalformedBody(String),
}

/// Result alias for version probing.
pub type ProbeResult<T> = Result<T, ProbeError>;
