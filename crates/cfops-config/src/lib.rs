//! Shared configuration for cfops.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `cfops_core::ClientConfig`. The CLI layers its global
//! flags on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cfops_core::{AuthCredentials, ClientConfig, NameResolution, PollConfig, TlsVerification};

/// Keyring service name for stored secrets.
pub const KEYRING_SERVICE: &str = "cfops";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{0}' not found")]
    UnknownProfile(String),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named foundation profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// The named profile, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_owned()))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named foundation profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Cloud Controller API URL (e.g., "https://api.sys.example.com").
    pub api: String,

    /// Targeted organization name.
    pub organization: Option<String>,

    /// Targeted space name.
    pub space: Option<String>,

    /// Auth mode: "token" or "password".
    #[serde(default = "default_auth_mode")]
    pub auth_mode: String,

    /// Bearer token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the bearer token.
    pub token_env: Option<String>,

    /// Username for the UAA password grant.
    pub username: Option<String>,

    /// Password (plaintext, prefer keyring).
    pub password: Option<String>,

    /// OAuth client for the password grant (defaults to `cf`).
    pub client_id: Option<String>,

    pub client_secret: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,

    /// Job polling interval in milliseconds.
    pub poll_interval_ms: Option<u64>,

    /// Give up polling a job after this many seconds.
    pub job_timeout_secs: Option<u64>,

    /// Reject duplicate names instead of taking the first match.
    pub strict_names: Option<bool>,
}

fn default_auth_mode() -> String {
    "token".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "cfops", "cfops").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cfops");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, then `CFOPS_`-prefixed environment variables.
///
/// Nested keys use a double underscore:
/// `CFOPS_PROFILES__PROD__SPACE=staging`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CFOPS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

/// Store a profile secret (`token` or `password`) in the system keyring.
pub fn store_secret(profile_name: &str, kind: &str, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{kind}"))?;
    entry.set_password(secret)?;
    Ok(())
}

fn keyring_secret(profile_name: &str, kind: &str) -> Option<SecretString> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{kind}"))
        .ok()
        .and_then(|entry| entry.get_password().ok())
        .map(SecretString::from)
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve a bearer token from the credential chain.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Some(secret) = keyring_secret(profile_name, "token") {
        return Ok(secret);
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve username + password for the UAA password grant.
pub fn resolve_password_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("CFOPS_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Env var
    if let Ok(pw) = std::env::var("CFOPS_PASSWORD") {
        return Ok((username, SecretString::from(pw)));
    }

    // 2. Keyring
    if let Some(pw) = keyring_secret(profile_name, "password") {
        return Ok((username, pw));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve `AuthCredentials` from a profile's `auth_mode` field.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    match profile.auth_mode.as_str() {
        "token" => Ok(AuthCredentials::Token(resolve_token(profile, profile_name)?)),
        "password" => {
            let (username, password) = resolve_password_credentials(profile, profile_name)?;
            Ok(AuthCredentials::Password {
                username,
                password,
                client_id: profile.client_id.clone(),
                client_secret: profile.client_secret.clone().map(SecretString::from),
            })
        }
        other => Err(ConfigError::Validation {
            field: "auth_mode".into(),
            reason: format!("expected 'token' or 'password', got '{other}'"),
        }),
    }
}

/// Everything in a profile except credentials.
pub fn profile_settings(profile: &Profile) -> Result<ProfileSettings, ConfigError> {
    let api_url: url::Url = profile.api.parse().map_err(|_| ConfigError::Validation {
        field: "api".into(),
        reason: format!("invalid URL: {}", profile.api),
    })?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut poll = PollConfig::default();
    if let Some(ms) = profile.poll_interval_ms {
        poll.interval = Duration::from_millis(ms);
    }
    poll.timeout = profile.job_timeout_secs.map(Duration::from_secs);

    Ok(ProfileSettings {
        api_url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
        poll,
        name_resolution: if profile.strict_names.unwrap_or(false) {
            NameResolution::Strict
        } else {
            NameResolution::FirstMatch
        },
    })
}

/// Connection settings resolved from a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    pub api_url: url::Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    pub poll: PollConfig,
    pub name_resolution: NameResolution,
}

/// Build a `ClientConfig` from a profile with no CLI flag overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ClientConfig, ConfigError> {
    let settings = profile_settings(profile)?;
    let auth = resolve_auth(profile, profile_name)?;

    Ok(ClientConfig {
        api_url: settings.api_url,
        auth,
        organization: profile.organization.clone(),
        space: profile.space.clone(),
        tls: settings.tls,
        timeout: settings.timeout,
        poll: settings.poll,
        name_resolution: settings.name_resolution,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "prod"

[defaults]
output = "json"

[profiles.prod]
api = "https://api.sys.example.com"
organization = "platform"
space = "dev"
token = "plain-token"
poll_interval_ms = 250
job_timeout_secs = 120
strict_names = true

[profiles.lab]
api = "https://api.lab.example.com"
auth_mode = "password"
username = "admin"
password = "pw"
insecure = true
"#;

    fn sample_config() -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        load_config_from(&path).unwrap()
    }

    #[test]
    fn loads_profiles_and_defaults() {
        let cfg = sample_config();

        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
        let (name, prod) = cfg.profile(None).unwrap();
        assert_eq!(name, "prod");
        assert_eq!(prod.organization.as_deref(), Some("platform"));
        assert_eq!(prod.auth_mode, "token");
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let cfg = sample_config();
        assert!(matches!(
            cfg.profile(Some("missing")),
            Err(ConfigError::UnknownProfile(name)) if name == "missing"
        ));
    }

    #[test]
    fn settings_carry_polling_and_strictness() {
        let cfg = sample_config();
        let (_, prod) = cfg.profile(Some("prod")).unwrap();
        let settings = profile_settings(prod).unwrap();

        assert_eq!(settings.poll.interval, Duration::from_millis(250));
        assert_eq!(settings.poll.timeout, Some(Duration::from_secs(120)));
        assert_eq!(settings.name_resolution, NameResolution::Strict);
        assert_eq!(settings.tls, TlsVerification::SystemDefaults);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn insecure_profile_skips_verification() {
        let cfg = sample_config();
        let (_, lab) = cfg.profile(Some("lab")).unwrap();
        let settings = profile_settings(lab).unwrap();

        assert_eq!(settings.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(settings.poll, PollConfig::default());
        assert_eq!(settings.name_resolution, NameResolution::FirstMatch);
    }

    #[test]
    fn plaintext_token_is_last_resort() {
        let profile = Profile {
            api: "https://api.example.com".into(),
            token: Some("plain".into()),
            auth_mode: "token".into(),
            ..Profile::default()
        };
        // A profile name nobody has a keyring entry for.
        let token = resolve_token(&profile, "cfops-test-no-keyring-entry").unwrap();
        assert_eq!(token.expose_secret(), "plain");
    }

    #[test]
    fn invalid_auth_mode_is_rejected() {
        let profile = Profile {
            api: "https://api.example.com".into(),
            auth_mode: "sso".into(),
            ..Profile::default()
        };
        assert!(matches!(
            resolve_auth(&profile, "x"),
            Err(ConfigError::Validation { field, .. }) if field == "auth_mode"
        ));
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let profile = Profile {
            api: "not a url".into(),
            ..Profile::default()
        };
        assert!(matches!(
            profile_settings(&profile),
            Err(ConfigError::Validation { field, .. }) if field == "api"
        ));
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                api: "https://api.example.com".into(),
                organization: Some("o".into()),
                auth_mode: "token".into(),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles.get("default"), cfg.profiles.get("default"));
    }
}
