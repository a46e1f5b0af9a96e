//! In-memory workload supervisor double.
//!
//! Records every mutation so callers can assert exactly which layer
//! applications and restarts a reconciliation performed. Used by the CLI
//! replay command and throughout the test suite; there is no real process
//! supervision behind it.

use std::collections::BTreeSet;

use crate::layer::ProcessLayer;

use super::traits::WorkloadSupervisor;
use super::{SupervisorError, SupervisorResult};

/// Recording in-memory implementation of [`WorkloadSupervisor`].
#[derive(Debug, Default)]
pub struct MemorySupervisor {
    reachable: bool,
    plan: ProcessLayer,
    running: BTreeSet<String>,
    applied: Vec<(String, ProcessLayer)>,
    restarted: Vec<String>,
    fail_apply: Option<String>,
    fail_restart: Option<String>,
}

impl MemorySupervisor {
    /// Create a supervisor that is reachable with an empty plan.
    pub fn new() -> Self {
        Self {
            reachable: true,
            ..Self::default()
        }
    }

    /// Create a supervisor whose endpoint cannot be contacted.
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Change endpoint reachability.
    pub fn set_reachable(&mut self, reachable: bool) {
        self.reachable = reachable;
    }

    /// The merged plan built up from applied layers.
    pub fn plan(&self) -> &ProcessLayer {
        &self.plan
    }

    /// Mutable access to the plan, for simulating drift behind the
    /// controller's back.
    pub fn plan_mut(&mut self) -> &mut ProcessLayer {
        &mut self.plan
    }

    /// Number of layer applications performed.
    pub fn apply_count(&self) -> usize {
        self.applied.len()
    }

    /// Number of service restarts performed.
    pub fn restart_count(&self) -> usize {
        self.restarted.len()
    }

    /// Services restarted, in order.
    pub fn restarted(&self) -> &[String] {
        &self.restarted
    }

    /// Mark a service as running without going through a restart.
    pub fn mark_running(&mut self, service: &str) {
        self.running.insert(service.to_string());
    }

    /// Make the next apply-layer call fail with the given reason.
    pub fn fail_next_apply(&mut self, reason: &str) {
        self.fail_apply = Some(reason.to_string());
    }

    /// Make the next restart call fail with the given reason.
    pub fn fail_next_restart(&mut self, reason: &str) {
        self.fail_restart = Some(reason.to_string());
    }

    fn ensure_reachable(&self) -> SupervisorResult<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(SupervisorError::NotReachable)
        }
    }
}

impl WorkloadSupervisor for MemorySupervisor {
    fn is_reachable(&self) -> bool {
        self.reachable
    }

    fn active_layer(&self) -> SupervisorResult<ProcessLayer> {
        self.ensure_reachable()?;
        Ok(self.plan.clone())
    }

    fn apply_layer(
        &mut self,
        label: &str,
        layer: &ProcessLayer,
        combine: bool,
    ) -> SupervisorResult<()> {
        self.ensure_reachable()?;
        if let Some(reason) = self.fail_apply.take() {
            return Err(SupervisorError::OperationFailed {
                operation: "apply-layer".to_string(),
                reason,
            });
        }

        if combine {
            for (name, spec) in &layer.services {
                self.plan.services.insert(name.clone(), spec.clone());
            }
        } else {
            self.plan = layer.clone();
        }
        self.applied.push((label.to_string(), layer.clone()));
        Ok(())
    }

    fn restart_service(&mut self, service: &str) -> SupervisorResult<()> {
        self.ensure_reachable()?;
        if let Some(reason) = self.fail_restart.take() {
            return Err(SupervisorError::OperationFailed {
                operation: "restart".to_string(),
                reason,
            });
        }

        self.running.insert(service.to_string());
        self.restarted.push(service.to_string());
        Ok(())
    }

    fn running_services(&self) -> SupervisorResult<BTreeSet<String>> {
        self.ensure_reachable()?;
        Ok(self.running.clone())
    }
}
