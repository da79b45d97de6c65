// ── Core error types ──
//
// Domain errors from usm-core. The `From<usm_api::Error>` impl classifies
// transport-layer failures; status codes and response bodies survive as
// diagnostic detail on the variants that need them.

use std::time::Duration;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Cannot reach {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("Gave up after {}s", .after.as_secs())]
    Timeout { after: Duration },

    #[error("Operation cancelled")]
    Cancelled,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} {identifier} could not be found")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("{message}")]
    AmbiguousResult { message: String },

    #[error("Response could not be decoded: {message}")]
    Deserialization { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Insufficient capacity: {message}")]
    Capacity { message: String },

    #[error("{operation}: unexpected HTTP status {status}: {body}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Creation failed: {message}")]
    Creation { message: String },

    #[error("Appliance is not ready for activation: {message}")]
    ApplianceState { message: String },

    #[error("Sensor {identifier} lost its connection and was deregistered")]
    Deregistered { identifier: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    /// A state-machine transition that the provisioning flow never makes.
    #[error("Invalid provisioning transition: {from} -> {to}")]
    InvalidState { from: String, to: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<usm_api::Error> for CoreError {
    fn from(err: usm_api::Error) -> Self {
        match err {
            usm_api::Error::Authentication { message } => CoreError::Authentication { message },
            usm_api::Error::NotAuthenticated => CoreError::Authentication {
                message: "not authenticated".into(),
            },
            usm_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "<unknown>".into());
                match e.status() {
                    Some(status) => CoreError::UnexpectedStatus {
                        operation: "request".into(),
                        status: status.as_u16(),
                        body: String::new(),
                    },
                    None => CoreError::Transport {
                        url,
                        reason: e.to_string(),
                    },
                }
            }
            usm_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            usm_api::Error::Tls(reason) => CoreError::Transport {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            usm_api::Error::UnsupportedVersion(v) => CoreError::Config {
                message: format!("Unsupported API version {v}"),
            },
            usm_api::Error::UnexpectedStatus {
                operation,
                status,
                body,
            } => CoreError::UnexpectedStatus {
                operation: operation.into(),
                status,
                body,
            },
            usm_api::Error::Deserialization { message, body: _ } => {
                CoreError::Deserialization { message }
            }
            usm_api::Error::Serialization(e) => CoreError::Internal(format!("encoding request: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = CoreError::not_found("job", "j-42");
        assert_eq!(err.to_string(), "job j-42 could not be found");
    }

    #[test]
    fn unexpected_status_keeps_detail() {
        let err: CoreError = usm_api::Error::UnexpectedStatus {
            operation: "delete sensor key",
            status: 200,
            body: "ok".into(),
        }
        .into();
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().contains("delete sensor key"));
    }

    #[test]
    fn unauthenticated_maps_to_authentication() {
        let err: CoreError = usm_api::Error::NotAuthenticated.into();
        assert!(matches!(err, CoreError::Authentication { .. }));
    }
}
