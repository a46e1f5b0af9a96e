//! Database credential state.
//!
//! Credentials arrive as a single delivery event carrying a `"host:port"`
//! endpoint plus a username and password, and are withdrawn as a unit by a
//! revocation event. The store never holds a partially populated tuple:
//! it is either fully set or fully empty, enforced by construction.

use thiserror::Error;

/// Errors raised while parsing a credential delivery payload.
///
/// These indicate a malformed event from the credential producer, which is
/// a contract violation rather than a recoverable runtime state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The endpoint string is not in `host:port` form.
    #[error("database endpoint '{0}' is not in host:port form")]
    MalformedEndpoint(String),

    /// A required credential field was delivered empty.
    #[error("credential field '{0}' is empty")]
    EmptyField(&'static str),
}

/// Result alias for credential parsing.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// A complete database credential tuple.
///
/// Every field is guaranteed non-empty; an absent credential set is
/// represented by [`CredentialStore`] holding `None`, never by blank fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseCredentials {
    /// Database host name or address.
    pub host: String,
    /// Database port, kept in the string form it was delivered in.
    pub port: String,
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
}

impl DatabaseCredentials {
    /// Parse a credential delivery payload into a complete tuple.
    ///
    /// The endpoint must split as `host:port` with both halves non-empty,
    /// and username/password must be non-empty.
    pub fn from_endpoint(
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> CredentialResult<Self> {
        let (host, port) = endpoint
            .split_once(':')
            .ok_or_else(|| CredentialError::MalformedEndpoint(endpoint.to_string()))?;

        if host.is_empty() || port.is_empty() {
            return Err(CredentialError::MalformedEndpoint(endpoint.to_string()));
        }
        if username.is_empty() {
            return Err(CredentialError::EmptyField("username"));
        }
        if password.is_empty() {
            return Err(CredentialError::EmptyField("password"));
        }

        Ok(Self {
            host: host.to_string(),
            port: port.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Holds the current, possibly absent, database credential tuple.
///
/// Created empty at controller start, fully populated on a delivery event,
/// and reset to empty on a revocation event.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    current: Option<DatabaseCredentials>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored credentials with a newly delivered tuple.
    pub fn provide(&mut self, credentials: DatabaseCredentials) {
        self.current = Some(credentials);
    }

    /// Clear the stored credentials.
    pub fn revoke(&mut self) {
        self.current = None;
    }

    /// The current credentials, if any are set.
    pub fn get(&self) -> Option<&DatabaseCredentials> {
        self.current.as_ref()
    }

    /// Returns true if a complete credential tuple is held.
    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }
}
