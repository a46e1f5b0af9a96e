//! Event replay against a live controller.
//!
//! The replay loop plays the role of the external dispatcher: it feeds
//! events to the controller one at a time, to completion, and prints the
//! resulting status after each one.

use std::io::BufRead;

use layerkeeper::controller::{Controller, Event};
use layerkeeper::probe::VersionProbe;
use layerkeeper::supervisor::WorkloadSupervisor;

use crate::error::CliError;

/// Replay newline-delimited JSON events from a reader.
///
/// Blank lines and `#` comment lines are skipped. Returns the number of
/// events handled. Stops at the first malformed line or controller error.
pub fn replay_events<R, S, P>(
    reader: R,
    controller: &mut Controller<S, P>,
) -> Result<usize, CliError>
where
    R: BufRead,
    S: WorkloadSupervisor,
    P: VersionProbe,
{
    let mut count = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CliError::EventRead {
            line: idx + 1,
            error: e,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: Event = serde_json::from_str(trimmed).map_err(|e| CliError::EventParse {
            line: idx + 1,
            error: e,
        })?;
        let kind = event.kind();
        controller.handle(event)?;

        let version = controller.workload_version();
        if version.is_empty() {
            println!("{:<22} -> {}", kind, controller.status());
        } else {
            println!("{:<22} -> {} (version {})", kind, controller.status(), version);
        }
        count += 1;
    }
    Ok(count)
}
