//! Operator-facing workload configuration.
//!
//! Configuration is replaced wholesale on each configuration-changed event,
//! but only after validation: a rejected value leaves the previous
//! configuration untouched.

use thiserror::Error;

/// Port reserved for the control protocol; never valid for the workload.
pub const RESERVED_SSH_PORT: u16 = 22;

/// Default workload HTTP port used before any configuration event arrives.
pub const DEFAULT_PORT: u16 = 8000;

/// Errors raised while validating incoming configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested port collides with the reserved control-protocol port.
    #[error("invalid port number, 22 is reserved for SSH")]
    ReservedPort,
}

/// Result alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The currently desired workload configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredConfig {
    /// Port the workload's HTTP server should listen on.
    pub port: u16,
}

impl Default for DesiredConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Validate a requested workload port.
pub fn validate_port(port: u16) -> ConfigResult<()> {
    if port == RESERVED_SSH_PORT {
        return Err(ConfigError::ReservedPort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(DesiredConfig::default().port, DEFAULT_PORT);
    }

    #[test]
    fn test_validate_port_accepts_normal_ports() {
        assert!(validate_port(8080).is_ok());
        assert!(validate_port(80).is_ok());
        assert!(validate_port(65535).is_ok());
    }

    #[test]
    fn test_validate_port_rejects_reserved_port() {
        assert_eq!(validate_port(22), Err(ConfigError::ReservedPort));
    }

    #[test]
    fn test_reserved_port_error_message() {
        let err = validate_port(22).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid port number, 22 is reserved for SSH"
        );
    }
}
