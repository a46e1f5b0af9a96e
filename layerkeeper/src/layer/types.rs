//! Layer data types.
//!
//! These are pure data types mirroring the supervisor's layer document
//! format. Service maps use `BTreeMap` so serialized layers and structural
//! comparisons are deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a service definition combines with earlier layers in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverridePolicy {
    /// This definition fully replaces any earlier definition of the service.
    Replace,
}

/// Whether the service starts automatically with the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupPolicy {
    /// The service is started and kept running by the supervisor.
    Enabled,
}

/// Definition of one managed service process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Combination semantics with earlier definitions of this service.
    #[serde(rename = "override")]
    pub override_policy: OverridePolicy,

    /// Short human-readable description of the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,

    /// Full command line the supervisor runs.
    pub command: String,

    /// Startup policy for the service.
    pub startup: StartupPolicy,

    /// Environment variables injected into the process.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

/// A declarative layer document: metadata plus the service definitions.
///
/// The metadata fields are informational only; whether the workload needs
/// re-applying is decided purely from [`ProcessLayer::services`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessLayer {
    /// Short human-readable description of the layer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,

    /// Longer description of the layer's purpose.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Service definitions, keyed by service name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, ServiceSpec>,
}

impl ProcessLayer {
    /// Look up one service definition by name.
    pub fn service(&self, name: &str) -> Option<&ServiceSpec> {
        self.services.get(name)
    }
}
