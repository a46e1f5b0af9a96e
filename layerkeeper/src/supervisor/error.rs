//! Supervisor error types.

use thiserror::Error;

/// Errors returned by workload-supervision operations.
///
/// "Not reachable" and "operation failed" are deliberately distinct: the
/// first is a normal not-yet-ready state the controller reports as Waiting,
/// the second is a real fault that must surface to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SupervisorError {
    /// The supervision endpoint cannot be contacted at all.
    #[error("workload supervision endpoint is not reachable")]
    NotReachable,

    /// The endpoint was contacted but the operation failed.
    #[error("supervisor operation '{operation}' failed: {reason}")]
    OperationFailed {
        /// The operation that failed, e.g. `apply-layer` or `restart`.
        operation: String,
        /// Reason reported by the endpoint.
        reason: String,
    },
}

/// Result alias for supervisor operations.
pub type SupervisorResult<T> = Result<T, SupervisorError>;
