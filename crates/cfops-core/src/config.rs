// ── Runtime connection configuration ──
//
// These types describe how to reach a Cloud Foundry foundation and which
// organization/space to target. They carry credentials but never touch
// disk; the CLI builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::job::PollConfig;
use crate::resolve::NameResolution;

/// How to obtain bearer tokens.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// A ready-made bearer token (e.g. from `cf oauth-token`).
    Token(SecretString),
    /// UAA password grant. UAA is discovered through `/v2/info`.
    Password {
        username: String,
        password: SecretString,
        /// OAuth client; `None` uses the stock `cf` client.
        client_id: Option<String>,
        client_secret: Option<SecretString>,
    },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (`--skip-ssl-validation`).
    DangerAcceptInvalid,
}

/// Everything needed to build an [`Operations`](crate::Operations).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Cloud Controller API endpoint (e.g. `https://api.sys.example.com`).
    pub api_url: Url,
    pub auth: AuthCredentials,
    /// Targeted organization name.
    pub organization: Option<String>,
    /// Targeted space name.
    pub space: Option<String>,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    pub poll: PollConfig,
    pub name_resolution: NameResolution,
}

impl ClientConfig {
    /// A config with default TLS, timeout, polling, and name resolution.
    pub fn new(api_url: Url, auth: AuthCredentials) -> Self {
        Self {
            api_url,
            auth,
            organization: None,
            space: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll: PollConfig::default(),
            name_resolution: NameResolution::default(),
        }
    }
}
