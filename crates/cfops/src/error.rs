//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use cfops_config::ConfigError;
use cfops_core::{ContextScope, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PLATFORM: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code, unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to Cloud Controller at {url}")]
    #[diagnostic(
        code(cfops::connection_failed),
        help(
            "Check that the API endpoint is reachable.\n\
             URL: {url}\n\
             Foundations with self-signed certificates need --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(cfops::auth_failed),
        help(
            "Refresh your token (cf oauth-token) or stored password.\n\
             Run: cfops config set-secret token --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(cfops::no_credentials),
        help(
            "Configure credentials with: cfops config init\n\
             Or set the CFOPS_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Targeting ────────────────────────────────────────────────────
    #[error("No {scope} targeted")]
    #[diagnostic(
        code(cfops::no_target),
        help("Pass --org/--space, or run: cfops config target --org <org> --space <space>")
    )]
    NoTarget { scope: ContextScope },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} {name} does not exist")]
    #[diagnostic(code(cfops::not_found))]
    NotFound { resource_type: String, name: String },

    #[error("{resource_type} name {name} matches more than one resource")]
    #[diagnostic(
        code(cfops::ambiguous),
        help("Drop --strict-names to take the first match.")
    )]
    Ambiguous { resource_type: String, name: String },

    // ── Platform ─────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(cfops::api_error))]
    Api {
        message: String,
        code: Option<i64>,
        error_code: Option<String>,
    },

    #[error("Job {job_id} failed: {description}")]
    #[diagnostic(code(cfops::job_failed))]
    JobFailed { job_id: String, description: String },

    #[error("Job {job_id} did not finish within {seconds}s")]
    #[diagnostic(
        code(cfops::job_timeout),
        help("The job may still complete on the platform. Raise --job-timeout to wait longer.")
    )]
    JobTimeout { job_id: String, seconds: u64 },

    #[error("Request timed out: {message}")]
    #[diagnostic(
        code(cfops::timeout),
        help("Increase timeout with --timeout or check the foundation's responsiveness.")
    )]
    Timeout { message: String },

    #[error("Interrupted while waiting for job {job_id}")]
    #[diagnostic(code(cfops::cancelled))]
    Cancelled { job_id: String },

    #[error("Interrupted")]
    #[diagnostic(code(cfops::interrupted))]
    Interrupted,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cfops::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(cfops::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: cfops config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(cfops::no_config),
        help(
            "Create one with: cfops config init\n\
             Expected at: {path}\n\
             Or pass --api and --token directly."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(cfops::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(cfops::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON parameters: {0}")]
    #[diagnostic(code(cfops::json), help("Check the JSON contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Api { .. } | Self::JobFailed { .. } => exit_code::PLATFORM,
            Self::JobTimeout { .. } | Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Cancelled { .. } | Self::Interrupted => exit_code::CANCELLED,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NoTarget { .. }
            | Self::Ambiguous { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout { message } => Self::Timeout { message },
            CoreError::MissingContext { scope } => Self::NoTarget { scope },
            CoreError::NotFound {
                resource_type,
                name,
            } => Self::NotFound {
                resource_type,
                name,
            },
            CoreError::Ambiguous {
                resource_type,
                name,
            } => Self::Ambiguous {
                resource_type,
                name,
            },
            CoreError::JobFailed {
                job_id,
                description,
                ..
            } => Self::JobFailed {
                job_id,
                description,
            },
            CoreError::PollTimeout {
                job_id,
                waited_secs,
            } => Self::JobTimeout {
                job_id,
                seconds: waited_secs,
            },
            CoreError::Cancelled { job_id } => Self::Cancelled { job_id },
            CoreError::Api {
                message,
                code,
                error_code,
                ..
            } => Self::Api {
                message,
                code,
                error_code,
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
