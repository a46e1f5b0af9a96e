//! Trait definition for the workload-supervision endpoint.

use std::collections::BTreeSet;

use crate::layer::ProcessLayer;

use super::SupervisorResult;

/// Outbound interface to the workload's process-supervision endpoint.
///
/// Implementations wrap whatever transport the supervisor actually speaks;
/// the controller only depends on this surface. Mutating calls take
/// `&mut self` because the controller processes one event to completion at
/// a time and owns its supervisor exclusively.
pub trait WorkloadSupervisor {
    /// Whether the supervision endpoint can currently be contacted.
    fn is_reachable(&self) -> bool;

    /// Fetch the layer currently in effect for the workload.
    fn active_layer(&self) -> SupervisorResult<ProcessLayer>;

    /// Apply a layer under the given label.
    ///
    /// With `combine` set, the layer overlays the existing plan rather
    /// than destructively replacing unrelated services.
    fn apply_layer(
        &mut self,
        label: &str,
        layer: &ProcessLayer,
        combine: bool,
    ) -> SupervisorResult<()>;

    /// Restart exactly the named service.
    fn restart_service(&mut self, service: &str) -> SupervisorResult<()>;

    /// Names of the services the supervisor currently shows as running.
    fn running_services(&self) -> SupervisorResult<BTreeSet<String>>;
}
