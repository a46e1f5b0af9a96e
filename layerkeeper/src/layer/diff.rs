//! Structural comparison of desired and active layers.
//!
//! Only the service-definition subtree participates in the comparison.
//! Layer documents carry metadata (summary, description) that has no
//! bearing on the running process; comparing the full document would cause
//! spurious restarts whenever that metadata drifts.

use super::ProcessLayer;

/// Returns true when the desired layer's services differ from the active
/// layer's services, meaning the layer must be re-applied and the managed
/// service restarted.
pub fn requires_reapply(desired: &ProcessLayer, active: &ProcessLayer) -> bool {
    desired.services != active.services
}
