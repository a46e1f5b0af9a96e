//! Interface to the external workload-supervision collaborator.
//!
//! The controller never supervises processes itself; it calls into the
//! supervision endpoint of the workload's container through the
//! [`WorkloadSupervisor`] trait. The trait exists so the controller can be
//! exercised against an in-memory double without a live endpoint.

mod error;
mod memory;
mod traits;

pub use error::{SupervisorError, SupervisorResult};
pub use memory::MemorySupervisor;
pub use traits::WorkloadSupervisor;
