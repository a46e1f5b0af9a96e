//! Pure construction of the desired process layer.
//!
//! `build_layer` is a deterministic function of the current credential and
//! configuration state. It performs no I/O, which keeps the desired-state
//! half of reconciliation independently testable.

use std::collections::BTreeMap;

use crate::config::DesiredConfig;
use crate::credentials::DatabaseCredentials;

use super::{OverridePolicy, ProcessLayer, ServiceSpec, StartupPolicy};

/// Environment key carrying the database host.
pub const ENV_DB_HOST: &str = "WORKLOAD_DB_HOST";
/// Environment key carrying the database port.
pub const ENV_DB_PORT: &str = "WORKLOAD_DB_PORT";
/// Environment key carrying the database username.
pub const ENV_DB_USER: &str = "WORKLOAD_DB_USER";
/// Environment key carrying the database password.
pub const ENV_DB_PASSWORD: &str = "WORKLOAD_DB_PASSWORD";

/// Build the desired layer for the managed service.
///
/// The command encodes the configured port; the environment carries the
/// credential tuple under fixed keys, or is empty while no credentials are
/// set.
pub fn build_layer(
    service_name: &str,
    base_command: &str,
    credentials: Option<&DatabaseCredentials>,
    config: &DesiredConfig,
) -> ProcessLayer {
    let command = format!("{} --host=0.0.0.0 --port={}", base_command, config.port);

    let environment = match credentials {
        Some(creds) => BTreeMap::from([
            (ENV_DB_HOST.to_string(), creds.host.clone()),
            (ENV_DB_PORT.to_string(), creds.port.clone()),
            (ENV_DB_USER.to_string(), creds.username.clone()),
            (ENV_DB_PASSWORD.to_string(), creds.password.clone()),
        ]),
        None => BTreeMap::new(),
    };

    let mut services = BTreeMap::new();
    services.insert(
        service_name.to_string(),
        ServiceSpec {
            override_policy: OverridePolicy::Replace,
            summary: "managed workload".to_string(),
            command,
            startup: StartupPolicy::Enabled,
            environment,
        },
    );

    ProcessLayer {
        summary: "workload service".to_string(),
        description: "layer for the managed workload service".to_string(),
        services,
    }
}
