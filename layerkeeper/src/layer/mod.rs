//! Process-layer model, construction, and comparison.
//!
//! A layer is a declarative specification of the managed service processes:
//! command line, environment, and startup policy, plus human-readable
//! metadata. Layers are derived values, always built fresh from the current
//! credential and configuration state, and compared structurally to decide
//! whether the running workload actually needs a restart.

mod builder;
mod diff;
mod types;

pub use builder::{
    build_layer, ENV_DB_HOST, ENV_DB_PASSWORD, ENV_DB_PORT, ENV_DB_USER,
};
pub use diff::requires_reapply;
pub use types::{OverridePolicy, ProcessLayer, ServiceSpec, StartupPolicy};
