//! The reconciliation controller.
//!
//! The controller accumulates partial state across uncorrelated events
//! (credential deliveries, configuration changes, readiness signals) and
//! converges the supervised workload toward the currently desired layer
//! through a single linear reconcile algorithm. There is exactly one code
//! path that decides whether to apply a layer and restart the service.
//!
//! Concurrency model: the controller is driven synchronously by an
//! external dispatcher, one event to completion at a time. All state is
//! owned exclusively by the controller instance; no locking is involved.

mod event;

pub use event::Event;

use thiserror::Error;

use crate::config::{self, DesiredConfig};
use crate::credentials::{CredentialError, CredentialStore, DatabaseCredentials};
use crate::layer::{build_layer, requires_reapply};
use crate::probe::VersionProbe;
use crate::status::{status_for, NoopStatusSink, ReconcileOutcome, Status, StatusSink};
use crate::supervisor::{SupervisorError, WorkloadSupervisor};

/// Errors surfaced by event handling.
///
/// Probe failures never appear here; they are swallowed inside the version
/// lookup. Everything else is typed so callers can distinguish a malformed
/// producer payload from a real supervisor fault.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A credential delivery payload violated the producer contract.
    #[error("malformed credential delivery: {0}")]
    Credentials(#[from] CredentialError),

    /// A supervisor operation failed outright.
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
}

/// Result alias for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Static identity of the managed workload.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Name of the managed service inside the supervisor's plan.
    pub service_name: String,
    /// Label the controller applies its layer under.
    pub layer_label: String,
    /// Workload command line, minus the host/port flags the layer builder
    /// appends.
    pub base_command: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            service_name: "workload".to_string(),
            layer_label: "layerkeeper".to_string(),
            base_command: "workload-server".to_string(),
        }
    }
}

/// Reconciliation controller for one supervised workload.
///
/// Generic over the supervision endpoint and the version probe so both can
/// be substituted in tests.
pub struct Controller<S, P> {
    settings: ControllerSettings,
    supervisor: S,
    probe: P,
    sink: Box<dyn StatusSink>,
    credentials: CredentialStore,
    config: DesiredConfig,
    status: Status,
    version: String,
}

impl<S, P> Controller<S, P>
where
    S: WorkloadSupervisor,
    P: VersionProbe,
{
    /// Create a controller with empty credentials, default configuration,
    /// and a no-op status sink.
    pub fn new(settings: ControllerSettings, supervisor: S, probe: P) -> Self {
        Self {
            settings,
            supervisor,
            probe,
            sink: Box::new(NoopStatusSink),
            credentials: CredentialStore::new(),
            config: DesiredConfig::default(),
            status: Status::Maintenance("waiting for first event".to_string()),
            version: String::new(),
        }
    }

    /// Replace the status sink.
    pub fn with_status_sink(mut self, sink: Box<dyn StatusSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The current externally visible status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// The last observed workload version, empty when unknown.
    pub fn workload_version(&self) -> &str {
        &self.version
    }

    /// The currently desired configuration.
    pub fn desired_config(&self) -> &DesiredConfig {
        &self.config
    }

    /// Whether a complete credential tuple is currently held.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_set()
    }

    /// Borrow the supervision endpoint, e.g. to inspect a recording double.
    pub fn supervisor(&self) -> &S {
        &self.supervisor
    }

    /// Mutably borrow the supervision endpoint.
    pub fn supervisor_mut(&mut self) -> &mut S {
        &mut self.supervisor
    }

    /// Dispatch one inbound event.
    ///
    /// Every handler that changes desired state funnels into
    /// [`Controller::reconcile`]; the two exceptions are a rejected
    /// configuration (Blocked, no side effects) and a credential
    /// revocation (Waiting, reconciliation deliberately not attempted).
    pub fn handle(&mut self, event: Event) -> ControllerResult<()> {
        tracing::debug!(event = event.kind(), "dispatching event");
        match event {
            Event::CredentialsProvided {
                endpoint,
                username,
                password,
            } => {
                let creds =
                    DatabaseCredentials::from_endpoint(&endpoint, &username, &password)?;
                tracing::info!(endpoint = %endpoint, "database credentials delivered");
                self.credentials.provide(creds);
                self.reconcile()
            }
            Event::CredentialsRevoked => {
                self.credentials.revoke();
                // Policy: revocation reports Waiting without reconciling,
                // so the running workload keeps its last layer until the
                // next triggering event.
                self.set_status(Status::Waiting(
                    "waiting for database credentials".to_string(),
                ));
                Ok(())
            }
            Event::ConfigChanged { port } => {
                tracing::debug!(port, "new workload port requested");
                if let Err(e) = config::validate_port(port) {
                    self.set_status(Status::Blocked(e.to_string()));
                    return Ok(());
                }
                self.config = DesiredConfig { port };
                self.reconcile()
            }
            Event::WorkloadReady => self.reconcile(),
        }
    }

    /// Converge the workload toward the currently desired layer.
    ///
    /// Idempotent given unchanged state: a second call observes no diff
    /// and performs no apply or restart.
    pub fn reconcile(&mut self) -> ControllerResult<()> {
        self.set_status(Status::Maintenance("assembling workload layer".to_string()));

        let desired = build_layer(
            &self.settings.service_name,
            &self.settings.base_command,
            self.credentials.get(),
            &self.config,
        );

        if !self.supervisor.is_reachable() {
            self.finish(ReconcileOutcome::default());
            return Ok(());
        }

        let active = self.supervisor.active_layer()?;

        let mut applied = false;
        let mut restarted = false;
        if requires_reapply(&desired, &active) {
            self.supervisor
                .apply_layer(&self.settings.layer_label, &desired, true)?;
            tracing::info!(
                label = %self.settings.layer_label,
                "added updated layer to workload plan"
            );

            self.supervisor.restart_service(&self.settings.service_name)?;
            tracing::info!(service = %self.settings.service_name, "restarted service");

            applied = true;
            restarted = true;
        }

        let version = self.observe_version();
        self.finish(ReconcileOutcome {
            applied,
            restarted,
            workload_reachable: true,
            version,
        });
        Ok(())
    }

    /// Best-effort version lookup.
    ///
    /// Probes only when the supervisor shows the managed service running.
    /// Every failure is logged and collapsed to an empty version; this is
    /// the one place where errors are deliberately absorbed.
    fn observe_version(&self) -> String {
        let running = match self.supervisor.running_services() {
            Ok(running) => running,
            Err(e) => {
                tracing::warn!(error = %e, "could not list running services");
                return String::new();
            }
        };
        if !running.contains(&self.settings.service_name) {
            return String::new();
        }

        match self.probe.fetch_version(self.config.port) {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(error = %e, "unable to get version from workload");
                String::new()
            }
        }
    }

    fn finish(&mut self, outcome: ReconcileOutcome) {
        self.version = outcome.version.clone();
        if outcome.workload_reachable {
            self.sink.workload_version(&self.version);
        }
        self.set_status(status_for(&outcome));
    }

    fn set_status(&mut self, status: Status) {
        if self.status != status {
            tracing::info!(old = %self.status, new = %status, "status changed");
        }
        self.status = status;
        self.sink.status_changed(&self.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeError, ProbeResult};
    use crate::supervisor::MemorySupervisor;

    /// Mock probe with a scripted response.
    struct MockProbe {
        response: Option<String>,
    }

    impl MockProbe {
        fn with_version(version: &str) -> Self {
            Self {
                response: Some(version.to_string()),
            }
        }

        fn failing() -> Self {
            Self { response: None }
        }
    }

    impl VersionProbe for MockProbe {
        fn fetch_version(&self, _port: u16) -> ProbeResult<String> {
            self.response
                .clone()
                .ok_or_else(|| ProbeError::MalformedBody("not json".to_string()))
        }
    }

    fn controller(
        supervisor: MemorySupervisor,
        probe: MockProbe,
    ) -> Controller<MemorySupervisor, MockProbe> {
        Controller::new(ControllerSettings::default(), supervisor, probe)
    }

    #[test]
    fn test_workload_ready_applies_and_restarts() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::with_version("1.0.0"));

        ctrl.handle(Event::WorkloadReady).unwrap();

        assert_eq!(ctrl.supervisor().apply_count(), 1);
        assert_eq!(ctrl.supervisor().restart_count(), 1);
        assert_eq!(ctrl.status(), &Status::Active);
        assert_eq!(ctrl.workload_version(), "1.0.0");
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::with_version("1.0.0"));

        ctrl.reconcile().unwrap();
        ctrl.reconcile().unwrap();

        // The second call observes no diff: one apply, one restart total.
        assert_eq!(ctrl.supervisor().apply_count(), 1);
        assert_eq!(ctrl.supervisor().restart_count(), 1);
    }

    #[test]
    fn test_unreachable_workload_is_waiting() {
        let mut ctrl = controller(
            MemorySupervisor::unreachable(),
            MockProbe::with_version("1.0.0"),
        );

        ctrl.handle(Event::WorkloadReady).unwrap();

        assert_eq!(
            ctrl.status(),
            &Status::Waiting("workload not reachable".to_string())
        );
        assert_eq!(ctrl.supervisor().apply_count(), 0);
        assert_eq!(ctrl.workload_version(), "");
    }

    #[test]
    fn test_reserved_port_blocks_without_side_effects() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::with_version("1.0.0"));
        ctrl.handle(Event::ConfigChanged { port: 8080 }).unwrap();
        let before = ctrl.desired_config().clone();

        ctrl.handle(Event::ConfigChanged { port: 22 }).unwrap();

        assert_eq!(
            ctrl.status(),
            &Status::Blocked("invalid port number, 22 is reserved for SSH".to_string())
        );
        // Previous configuration retained, no extra apply or restart.
        assert_eq!(ctrl.desired_config(), &before);
        assert_eq!(ctrl.supervisor().apply_count(), 1);
    }

    #[test]
    fn test_credentials_provided_lands_in_environment() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::with_version("1.0.0"));

        ctrl.handle(Event::CredentialsProvided {
            endpoint: "10.0.0.5:5432".to_string(),
            username: "alice".to_string(),
            password: "s3cr3t".to_string(),
        })
        .unwrap();

        let plan = ctrl.supervisor().plan().clone();
        let env = &plan.service("workload").unwrap().environment;
        assert_eq!(
            env.get(crate::layer::ENV_DB_HOST).map(String::as_str),
            Some("10.0.0.5")
        );
        assert!(ctrl.has_credentials());
    }

    #[test]
    fn test_credentials_redelivery_overwrites() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::with_version("1.0.0"));

        for endpoint in ["db-a:5432", "db-b:5433"] {
            ctrl.handle(Event::CredentialsProvided {
                endpoint: endpoint.to_string(),
                username: "alice".to_string(),
                password: "pw".to_string(),
            })
            .unwrap();
        }

        let plan = ctrl.supervisor().plan().clone();
        let env = &plan.service("workload").unwrap().environment;
        assert_eq!(
            env.get(crate::layer::ENV_DB_HOST).map(String::as_str),
            Some("db-b")
        );
        assert_eq!(ctrl.supervisor().apply_count(), 2);
    }

    #[test]
    fn test_malformed_endpoint_is_fatal() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::with_version("1.0.0"));

        let err = ctrl
            .handle(Event::CredentialsProvided {
                endpoint: "no-port-here".to_string(),
                username: "alice".to_string(),
                password: "pw".to_string(),
            })
            .unwrap_err();

        assert!(matches!(err, ControllerError::Credentials(_)));
        assert!(!ctrl.has_credentials());
    }

    #[test]
    fn test_revocation_clears_credentials_and_waits() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::with_version("1.0.0"));
        ctrl.handle(Event::CredentialsProvided {
            endpoint: "db:5432".to_string(),
            username: "alice".to_string(),
            password: "pw".to_string(),
        })
        .unwrap();
        assert_eq!(ctrl.status(), &Status::Active);
        let applies_before = ctrl.supervisor().apply_count();

        ctrl.handle(Event::CredentialsRevoked).unwrap();

        assert!(!ctrl.has_credentials());
        assert_eq!(
            ctrl.status(),
            &Status::Waiting("waiting for database credentials".to_string())
        );
        // Revocation does not reconcile even though the workload is
        // reachable.
        assert_eq!(ctrl.supervisor().apply_count(), applies_before);
    }

    #[test]
    fn test_probe_failure_does_not_abort_reconciliation() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::failing());

        ctrl.handle(Event::WorkloadReady).unwrap();

        assert_eq!(ctrl.status(), &Status::Active);
        assert_eq!(ctrl.workload_version(), "");
    }

    #[test]
    fn test_probe_skipped_when_service_not_running() {
        // Converged plan but the service never restarted, so it is not in
        // the running set; the probe must not even be consulted.
        let mut supervisor = MemorySupervisor::new();
        let desired = build_layer(
            "workload",
            "workload-server",
            None,
            &DesiredConfig::default(),
        );
        supervisor.apply_layer("layerkeeper", &desired, true).unwrap();

        struct PanicProbe;
        impl VersionProbe for PanicProbe {
            fn fetch_version(&self, _port: u16) -> ProbeResult<String> {
                panic!("probe must not run while the service is down");
            }
        }

        let mut ctrl = Controller::new(ControllerSettings::default(), supervisor, PanicProbe);
        ctrl.reconcile().unwrap();

        assert_eq!(ctrl.status(), &Status::Active);
        assert_eq!(ctrl.workload_version(), "");
    }

    #[test]
    fn test_apply_failure_surfaces_as_supervisor_error() {
        let mut supervisor = MemorySupervisor::new();
        supervisor.fail_next_apply("layer rejected");
        let mut ctrl = Controller::new(
            ControllerSettings::default(),
            supervisor,
            MockProbe::with_version("1.0.0"),
        );

        let err = ctrl.handle(Event::WorkloadReady).unwrap_err();

        match err {
            ControllerError::Supervisor(SupervisorError::OperationFailed { .. }) => {}
            other => panic!("expected operation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_restart_failure_surfaces_as_supervisor_error() {
        let mut supervisor = MemorySupervisor::new();
        supervisor.fail_next_restart("no such service");
        let mut ctrl = Controller::new(
            ControllerSettings::default(),
            supervisor,
            MockProbe::with_version("1.0.0"),
        );

        let err = ctrl.handle(Event::WorkloadReady).unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Supervisor(SupervisorError::OperationFailed { .. })
        ));
    }

    #[test]
    fn test_metadata_only_drift_does_not_restart() {
        let mut ctrl = controller(MemorySupervisor::new(), MockProbe::with_version("1.0.0"));
        ctrl.reconcile().unwrap();

        // Drift the plan metadata behind the controller's back.
        let plan = ctrl.supervisor_mut().plan_mut();
        plan.summary = "drifted summary".to_string();
        plan.description = "unrelated metadata".to_string();

        ctrl.reconcile().unwrap();
        assert_eq!(ctrl.supervisor().apply_count(), 1);
        assert_eq!(ctrl.supervisor().restart_count(), 1);
    }
}
