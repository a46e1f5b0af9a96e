//! Inbound events.
//!
//! Events arrive from an external dispatcher, one at a time, already
//! decoded from their wire form. The serde representation is the JSON the
//! CLI replay command reads: a `"event"` tag plus the payload fields.

use serde::{Deserialize, Serialize};

/// An inbound event for the controller to dispatch on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    /// Database credentials became available (or were re-delivered with a
    /// new endpoint).
    CredentialsProvided {
        /// Database endpoint in `host:port` form.
        endpoint: String,
        /// Database username.
        username: String,
        /// Database password.
        password: String,
    },
    /// Database credentials were withdrawn.
    CredentialsRevoked,
    /// The operator changed the workload configuration.
    ConfigChanged {
        /// Requested workload HTTP port.
        port: u16,
    },
    /// The workload's supervision endpoint signalled readiness.
    WorkloadReady,
}

impl Event {
    /// Short name of the event kind, matching the serde tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CredentialsProvided { .. } => "credentials-provided",
            Self::CredentialsRevoked => "credentials-revoked",
            Self::ConfigChanged { .. } => "config-changed",
            Self::WorkloadReady => "workload-ready",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_provided_round_trip() {
        let json = r#"{"event":"credentials-provided","endpoint":"10.0.0.5:5432","username":"alice","password":"s3cr3t"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            Event::CredentialsProvided {
                endpoint: "10.0.0.5:5432".to_string(),
                username: "alice".to_string(),
                password: "s3cr3t".to_string(),
            }
        );
        assert_eq!(serde_json::to_string(&event).unwrap(), json);
    }

    #[test]
    fn test_payload_free_events_parse() {
        let revoked: Event = serde_json::from_str(r#"{"event":"credentials-revoked"}"#).unwrap();
        assert_eq!(revoked, Event::CredentialsRevoked);

        let ready: Event = serde_json::from_str(r#"{"event":"workload-ready"}"#).unwrap();
        assert_eq!(ready, Event::WorkloadReady);
    }

    #[test]
    fn test_config_changed_parses_port() {
        let event: Event =
            serde_json::from_str(r#"{"event":"config-changed","port":8080}"#).unwrap();
        assert_eq!(event, Event::ConfigChanged { port: 8080 });
    }

    #[test]
    fn test_unknown_event_tag_is_rejected() {
        assert!(serde_json::from_str::<Event>(r#"{"event":"workload-stopped"}"#).is_err());
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(Event::CredentialsRevoked.kind(), "credentials-revoked");
        assert_eq!(Event::WorkloadReady.kind(), "workload-ready");
        assert_eq!(Event::ConfigChanged { port: 1 }.kind(), "config-changed");
    }
}
