// ── Core error types ──
//
// User-facing errors from cfops-core. Transport failures keep the
// platform's status, numeric code, and description so callers can still
// match on them; everything else names the resource and the operation.

use strum::Display;
use thiserror::Error;

/// Which piece of targeted context is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ContextScope {
    Organization,
    Space,
}

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    /// The caller named something that does not exist or is ambiguous.
    InvalidArgument,
    /// The operation needs context that was never supplied.
    IllegalState,
    /// The platform rejected the request or a job failed.
    Platform,
    /// The platform could not be reached or refused our credentials.
    Connection,
    /// The caller cancelled the operation.
    Cancelled,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to Cloud Controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    // ── Resolution errors ────────────────────────────────────────────
    #[error("No {scope} targeted")]
    MissingContext { scope: ContextScope },

    #[error("{resource_type} {name} does not exist")]
    NotFound { resource_type: String, name: String },

    #[error("{resource_type} name {name} is ambiguous: more than one match")]
    Ambiguous { resource_type: String, name: String },

    // ── Job errors ───────────────────────────────────────────────────
    /// A platform job (or service operation) ended in `failed`. The
    /// platform's own code and description are carried unchanged.
    #[error("Job {job_id} failed: {description}")]
    JobFailed {
        job_id: String,
        code: Option<i64>,
        error_code: Option<String>,
        description: String,
    },

    #[error("Job {job_id} did not finish within {waited_secs}s")]
    PollTimeout { job_id: String, waited_secs: u64 },

    #[error("Polling of job {job_id} was cancelled")]
    Cancelled { job_id: String },

    // ── API errors ───────────────────────────────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// Numeric platform code (e.g. `130008`).
        code: Option<i64>,
        /// Symbolic platform code (e.g. `CF-RouteNotFound`).
        error_code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn not_found(resource_type: &str, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_owned(),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionFailed { .. }
            | Self::AuthenticationFailed { .. }
            | Self::Timeout { .. } => ErrorKind::Connection,
            Self::MissingContext { .. } => ErrorKind::IllegalState,
            Self::NotFound { .. }
            | Self::Ambiguous { .. }
            | Self::Config { .. } => ErrorKind::InvalidArgument,
            Self::JobFailed { .. }
            | Self::PollTimeout { .. }
            | Self::Api { .. }
            | Self::Internal(_) => ErrorKind::Platform,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    /// Numeric platform code from an API error or failed job.
    pub fn platform_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } | Self::JobFailed { code, .. } => *code,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cfops_api::Error> for CoreError {
    fn from(err: cfops_api::Error) -> Self {
        match err {
            cfops_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cfops_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout {
                        message: e.to_string(),
                    }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        error_code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            cfops_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            cfops_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            cfops_api::Error::CloudController {
                status,
                code,
                error_code,
                description,
            } => CoreError::Api {
                message: description,
                code,
                error_code,
                status: Some(status),
            },
            cfops_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_type_and_target() {
        let err = CoreError::not_found("Service instance", "my-db");
        assert_eq!(err.to_string(), "Service instance my-db does not exist");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn missing_context_is_illegal_state() {
        let err = CoreError::MissingContext {
            scope: ContextScope::Space,
        };
        assert_eq!(err.to_string(), "No space targeted");
        assert_eq!(err.kind(), ErrorKind::IllegalState);
    }

    #[test]
    fn platform_error_keeps_codes() {
        let err = CoreError::from(cfops_api::Error::CloudController {
            status: 400,
            code: Some(130_008),
            error_code: Some("CF-ServiceInstanceAlreadyBoundToSameRoute".into()),
            description: "already bound".into(),
        });
        assert_eq!(err.platform_code(), Some(130_008));
        assert_eq!(err.kind(), ErrorKind::Platform);
        assert_eq!(err.to_string(), "already bound");
    }

    #[test]
    fn undecodable_body_is_internal() {
        let err = CoreError::from(cfops_api::Error::Deserialization {
            message: "missing field `resources`".into(),
            body: "{}".into(),
        });
        assert!(matches!(err, CoreError::Internal(_)));
        assert_eq!(err.kind(), ErrorKind::Platform);
    }
}
