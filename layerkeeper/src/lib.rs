//! LayerKeeper - reconciliation controller for a supervised workload
//!
//! This library keeps one externally supervised workload process in sync
//! with three independently arriving inputs: delivered database
//! credentials, operator configuration, and workload-readiness signals.
//!
//! # High-Level API
//!
//! The [`controller`] module is the entry point. A [`controller::Controller`]
//! owns all accumulated state and is driven one event at a time:
//!
//! ```ignore
//! use layerkeeper::controller::{Controller, ControllerSettings, Event};
//! use layerkeeper::probe::HttpVersionProbe;
//!
//! let mut controller = Controller::new(
//!     ControllerSettings::default(),
//!     supervisor,
//!     HttpVersionProbe::new(),
//! );
//!
//! controller.handle(Event::WorkloadReady)?;
//! println!("{}", controller.status());
//! ```

pub mod config;
pub mod controller;
pub mod credentials;
pub mod layer;
pub mod logging;
pub mod probe;
pub mod status;
pub mod supervisor;

/// Version of the LayerKeeper library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
