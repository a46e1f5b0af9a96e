//! LayerKeeper CLI - Command-line interface
//!
//! Replays a stream of JSON-encoded workload events against a
//! reconciliation controller backed by an in-memory supervisor, printing
//! the status transition after each event. Acts as the external event
//! dispatcher for demos and end-to-end exercises.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;

use layerkeeper::controller::{Controller, ControllerSettings};
use layerkeeper::logging;
use layerkeeper::probe::HttpVersionProbe;
use layerkeeper::status::TracingStatusSink;
use layerkeeper::supervisor::MemorySupervisor;

mod error;
mod replay;

use error::CliError;

#[derive(Parser)]
#[command(name = "layerkeeper")]
#[command(version = layerkeeper::VERSION)]
#[command(about = "Replay workload events against a reconciliation controller", long_about = None)]
struct Args {
    /// Path to a newline-delimited JSON event file (reads stdin if omitted)
    #[arg(long)]
    events: Option<PathBuf>,

    /// Name of the managed service in the supervisor's plan
    #[arg(long, default_value = "workload")]
    service_name: String,

    /// Label the controller applies its layer under
    #[arg(long, default_value = "layerkeeper")]
    layer_label: String,

    /// Workload command line, minus the host/port flags
    #[arg(long, default_value = "workload-server")]
    command: String,

    /// Start with the supervision endpoint unreachable
    #[arg(long)]
    unreachable: bool,

    /// Skip log file setup (stdout printing only)
    #[arg(long)]
    no_log_file: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        e.exit();
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let _guard = if args.no_log_file {
        None
    } else {
        let guard = logging::init_logging(logging::default_log_dir(), logging::default_log_file())
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;
        Some(guard)
    };

    let settings = ControllerSettings {
        service_name: args.service_name.clone(),
        layer_label: args.layer_label.clone(),
        base_command: args.command.clone(),
    };
    let supervisor = if args.unreachable {
        MemorySupervisor::unreachable()
    } else {
        MemorySupervisor::new()
    };

    let mut controller = Controller::new(settings, supervisor, HttpVersionProbe::new())
        .with_status_sink(Box::new(TracingStatusSink));

    let count = match &args.events {
        Some(path) => {
            let file = File::open(path).map_err(|e| CliError::EventFile {
                path: path.display().to_string(),
                error: e,
            })?;
            replay::replay_events(BufReader::new(file), &mut controller)?
        }
        None => replay::replay_events(std::io::stdin().lock(), &mut controller)?,
    };

    tracing::info!(count, status = %controller.status(), "event replay complete");
    println!();
    println!("{} events replayed; final status: {}", count, controller.status());
    Ok(())
}
