//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use usm_config::ConfigError;
use usm_core::CoreError;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CAPACITY: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach {url}")]
    #[diagnostic(
        code(usmctl::connection_failed),
        help(
            "Check the tenant host and your network.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(usmctl::auth_failed),
        help(
            "Verify the username and password for this tenant.\n\
             Passwords are read from USM_PASSWORD, ALIENVAULT_PASSWORD,\n\
             the system keyring, or the profile."
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(usmctl::no_credentials),
        help(
            "Set --username and USM_PASSWORD, or add username/password_env\n\
             to [profiles.{profile}] in {path}"
        )
    )]
    NoCredentials { profile: String, path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(usmctl::not_found),
        help("Run: usmctl {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Sensor '{identifier}' had lost its connection and was deregistered")]
    #[diagnostic(code(usmctl::deregistered))]
    Deregistered { identifier: String },

    #[error("{message}")]
    #[diagnostic(
        code(usmctl::ambiguous),
        help("Sensors are matched by name. Remove or rename the duplicates and retry.")
    )]
    Ambiguous { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(usmctl::capacity),
        help(
            "Every registered sensor and unused key takes a license slot.\n\
             Run: usmctl license capacity"
        )
    )]
    Capacity { message: String },

    #[error("{message}")]
    #[diagnostic(code(usmctl::appliance_state))]
    ApplianceState { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{operation} returned HTTP {status}")]
    #[diagnostic(code(usmctl::api_error), help("Response body: {body}"))]
    ApiError {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("{message}")]
    #[diagnostic(code(usmctl::api_error))]
    Api { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(usmctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(usmctl::profile_not_found),
        help("Define [profiles.{name}] in {path}")
    )]
    ProfileNotFound { name: String, path: String },

    #[error("No tenant host configured")]
    #[diagnostic(
        code(usmctl::no_host),
        help(
            "Pass --host, set USM_HOST or ALIENVAULT_FQDN,\n\
             or add host to a profile in {path}"
        )
    )]
    NoHost { path: String },

    #[error("{0}")]
    #[diagnostic(code(usmctl::config))]
    Config(String),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(usmctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Cancelled")]
    #[diagnostic(code(usmctl::cancelled))]
    Cancelled,

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Timed out after {}s", .after.as_secs())]
    #[diagnostic(
        code(usmctl::timeout),
        help("Increase --timeout, or --deadline for provisioning.")
    )]
    Timeout { after: Duration },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(usmctl::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::Deregistered { .. } => exit_code::NOT_FOUND,
            Self::Capacity { .. } => exit_code::CAPACITY,
            Self::Ambiguous { .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoHost { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Authentication { message } => CliError::AuthFailed { message },

            CoreError::Timeout { after } => CliError::Timeout { after },

            CoreError::Cancelled => CliError::Cancelled,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(entity_type).into(),
                resource_type: entity_type.into(),
                identifier,
            },

            CoreError::Deregistered { identifier } => CliError::Deregistered { identifier },

            CoreError::AmbiguousResult { message } => CliError::Ambiguous { message },

            CoreError::Capacity { message } => CliError::Capacity { message },

            CoreError::ApplianceState { message } => CliError::ApplianceState { message },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::UnexpectedStatus {
                operation,
                status,
                body,
            } => CliError::ApiError {
                operation,
                status,
                body,
            },

            CoreError::Config { message } => CliError::Config(message),

            CoreError::Creation { message }
            | CoreError::Deserialization { message }
            | CoreError::Internal(message) => CliError::Api { message },

            CoreError::InvalidState { from, to } => CliError::Api {
                message: format!("provisioning cannot move from {from} to {to}"),
            },
        }
    }
}

fn list_command_for(entity_type: &str) -> &'static str {
    if entity_type.contains("key") {
        "keys list"
    } else if entity_type.contains("sensor") {
        "sensors list"
    } else {
        "jobs list"
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let path = usm_config::config_path().display().to_string();
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name, path } => CliError::ProfileNotFound {
                name,
                path: path.display().to_string(),
            },
            ConfigError::NoHost { .. } => CliError::NoHost { path },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile, path },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}
