use thiserror::Error;

/// Top-level error type for the `cfops-api` crate.
///
/// Covers every failure mode of the raw API surfaces: authentication
/// (UAA), transport, and structured Cloud Controller errors.
/// `cfops-core` maps these into operation-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token acquisition failed, or the Cloud Controller rejected the token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Cloud Controller ────────────────────────────────────────────
    /// Structured error from the Cloud Controller.
    ///
    /// `code` is the numeric platform code (e.g. `130008`), `error_code`
    /// the symbolic one (e.g. `CF-ServiceInstanceAlreadyBoundToSameRoute`).
    #[error("Cloud Controller error (HTTP {status}): {description}")]
    CloudController {
        status: u16,
        code: Option<i64>,
        error_code: Option<String>,
        description: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this workspace retries; the flag is for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::CloudController { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::CloudController { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the numeric platform error code, if available.
    pub fn platform_code(&self) -> Option<i64> {
        match self {
            Self::CloudController { code, .. } => *code,
            _ => None,
        }
    }

    /// Extract the symbolic platform error code, if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::CloudController { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}
