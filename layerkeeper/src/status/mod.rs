//! Operator-visible status.
//!
//! Exactly one status value is current at any time, owned by the
//! controller and overwritten on every reconciliation attempt or
//! validation failure. The precedence between the terminal values is
//! strict: Blocked (failed validation) beats Waiting (workload or
//! credentials not ready) beats Active.

mod reporter;
mod sink;

pub use reporter::status_for;
pub use sink::{NoopStatusSink, StatusSink, TracingStatusSink};

/// Externally visible status of the managed workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The controller is actively working on convergence.
    Maintenance(String),
    /// A dependency is not yet available; recoverable without operator
    /// intervention once another triggering event arrives.
    Waiting(String),
    /// User input was rejected; terminal until a new configuration event
    /// arrives.
    Blocked(String),
    /// The workload is converged and running.
    Active,
}

impl Status {
    /// Short machine-friendly name for the status value.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Maintenance(_) => "maintenance",
            Self::Waiting(_) => "waiting",
            Self::Blocked(_) => "blocked",
            Self::Active => "active",
        }
    }

    /// The human-readable message carried by the status, if any.
    pub fn message(&self) -> &str {
        match self {
            Self::Maintenance(msg) | Self::Waiting(msg) | Self::Blocked(msg) => msg,
            Self::Active => "",
        }
    }

    /// Returns true if the workload is converged.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message().is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{}: {}", self.name(), self.message())
        }
    }
}

/// Outcome of a single reconciliation attempt.
///
/// Produced once per reconciliation and consumed immediately by the status
/// reporter; never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Whether a new layer was applied.
    pub applied: bool,
    /// Whether the managed service was restarted.
    pub restarted: bool,
    /// Whether the supervision endpoint could be contacted.
    pub workload_reachable: bool,
    /// Self-reported workload version, empty when unknown.
    pub version: String,
}
