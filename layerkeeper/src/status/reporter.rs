//! Mapping from reconciliation outcomes to status values.

use super::{ReconcileOutcome, Status};

/// Derive the externally visible status from a reconciliation outcome.
///
/// Blocked never originates here: failed validation short-circuits before
/// any reconciliation runs, so by the time an outcome exists the only
/// question is whether the workload was reachable. The version string
/// rides along on the controller as a side channel and does not influence
/// the result.
pub fn status_for(outcome: &ReconcileOutcome) -> Status {
    if outcome.workload_reachable {
        Status::Active
    } else {
        Status::Waiting("workload not reachable".to_string())
    }
}
