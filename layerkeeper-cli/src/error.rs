//! CLI error handling with user-friendly messages.

use std::fmt;
use std::process;

use layerkeeper::controller::ControllerError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to open the event file
    EventFile { path: String, error: std::io::Error },
    /// Failed to read an event line
    EventRead { line: usize, error: std::io::Error },
    /// Failed to parse an event line as JSON
    EventParse {
        line: usize,
        error: serde_json::Error,
    },
    /// The controller rejected an event or a supervisor call failed
    Controller(ControllerError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::EventParse { .. } = self {
            eprintln!();
            eprintln!("Events are newline-delimited JSON objects, for example:");
            eprintln!(r#"  {{"event":"config-changed","port":8080}}"#);
            eprintln!(r#"  {{"event":"workload-ready"}}"#);
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::EventFile { path, error } => {
                write!(f, "Failed to open event file '{}': {}", path, error)
            }
            CliError::EventRead { line, error } => {
                write!(f, "Failed to read event on line {}: {}", line, error)
            }
            CliError::EventParse { line, error } => {
                write!(f, "Invalid event on line {}: {}", line, error)
            }
            CliError::Controller(e) => write!(f, "Controller error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::EventFile { error, .. } => Some(error),
            CliError::EventRead { error, .. } => Some(error),
            CliError::EventParse { error, .. } => Some(error),
            CliError::Controller(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<ControllerError> for CliError {
    fn from(e: ControllerError) -> Self {
        CliError::Controller(e)
    }
}
