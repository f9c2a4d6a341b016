//! CLI configuration: a thin layer over `cfops_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides (--api,
//! --token, --org, --space, ...) on top of the active profile.

use std::time::Duration;

use secrecy::SecretString;

use cfops_core::{AuthCredentials, ClientConfig, NameResolution, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use cfops_config::{
    Config, Profile, config_path, load_config_or_default, profile_settings, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the `ClientConfig` for a command: profile values first, flags on top.
pub fn build_client_config(global: &GlobalOpts, cfg: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    match cfg.profiles.get(&profile_name) {
        Some(profile) => resolve_profile(profile, &profile_name, global),
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            available: available_profiles(cfg),
            name: profile_name,
        }),
        None => from_flags(global, &profile_name),
    }
}

/// Translate a `Profile` + global flags into a `ClientConfig`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut profile = profile.clone();
    if let Some(ref api) = global.api {
        profile.api.clone_from(api);
    }
    let settings = profile_settings(&profile)?;

    let auth = match global.token {
        Some(ref token) => AuthCredentials::Token(SecretString::from(token.clone())),
        None => cfops_config::resolve_auth(&profile, profile_name)?,
    };

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        settings.tls
    };

    let mut poll = settings.poll;
    if let Some(secs) = global.job_timeout {
        poll.timeout = Some(Duration::from_secs(secs));
    }

    Ok(ClientConfig {
        api_url: settings.api_url,
        auth,
        organization: global.org.clone().or(profile.organization),
        space: global.space.clone().or(profile.space),
        tls,
        timeout: profile
            .timeout
            .map_or(Duration::from_secs(global.timeout), Duration::from_secs),
        poll,
        name_resolution: name_resolution(global, settings.name_resolution),
    })
}

/// No profile on disk: everything comes from flags / env vars.
fn from_flags(global: &GlobalOpts, profile_name: &str) -> Result<ClientConfig, CliError> {
    let url_str = global.api.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "api".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let token = global.token.clone().ok_or_else(|| CliError::NoCredentials {
        profile: profile_name.to_owned(),
    })?;

    let mut config = ClientConfig::new(url, AuthCredentials::Token(SecretString::from(token)));
    config.organization.clone_from(&global.org);
    config.space.clone_from(&global.space);
    config.timeout = Duration::from_secs(global.timeout);
    config.poll.timeout = global.job_timeout.map(Duration::from_secs);
    config.name_resolution = name_resolution(global, NameResolution::FirstMatch);
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(config)
}

fn name_resolution(global: &GlobalOpts, from_profile: NameResolution) -> NameResolution {
    if global.strict_names {
        NameResolution::Strict
    } else {
        from_profile
    }
}

pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}
