//! Best-effort workload version probing.
//!
//! The workload exposes its own version over HTTP. Probing it is strictly
//! best effort: the controller asks only when the managed service shows as
//! running, and every probe failure is reported as a typed error that the
//! controller logs and converts to "no version available".

mod error;
mod http;

pub use error::{ProbeError, ProbeResult};
pub use http::HttpVersionProbe;

/// Queries the running workload for a human-readable version string.
pub trait VersionProbe {
    /// Fetch the workload's self-reported version from its HTTP endpoint
    /// on the given port.
    fn fetch_version(&self, port: u16) -> ProbeResult<String>;
}
