//! Status sink trait and built-in implementations.
//!
//! The sink is the operator-visibility channel: it receives every status
//! transition and every observed workload version. Keeping it behind a
//! trait lets the CLI print transitions while the library default simply
//! logs them.

use super::Status;

/// Receives operator-visible state as the controller produces it.
pub trait StatusSink {
    /// Called whenever the controller assigns a status, including
    /// transient Maintenance values during reconciliation.
    fn status_changed(&self, status: &Status);

    /// Called with the workload's self-reported version after each
    /// reconciliation that reached the workload. Empty when unknown.
    fn workload_version(&self, version: &str);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStatusSink;

impl StatusSink for NoopStatusSink {
    fn status_changed(&self, _status: &Status) {}

    fn workload_version(&self, _version: &str) {}
}

/// Sink that emits transitions through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn status_changed(&self, status: &Status) {
        tracing::info!(status = %status, "workload status");
    }

    fn workload_version(&self, version: &str) {
        if version.is_empty() {
            tracing::debug!("workload version unknown");
        } else {
            tracing::info!(version = %version, "observed workload version");
        }
    }
}
