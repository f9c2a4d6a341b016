//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, SecretKind};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking secrets.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let Some(p) = cfg.profiles.get(name) else {
            continue;
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "api = \"{}\"", p.api);
        if let Some(ref org) = p.organization {
            let _ = writeln!(out, "organization = \"{org}\"");
        }
        if let Some(ref space) = p.space {
            let _ = writeln!(out, "space = \"{space}\"");
        }
        let _ = writeln!(out, "auth_mode = \"{}\"", p.auth_mode);
        if p.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref client) = p.client_id {
            let _ = writeln!(out, "client_id = \"{client}\"");
        }
        if p.client_secret.is_some() {
            let _ = writeln!(out, "client_secret = \"****\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(ms) = p.poll_interval_ms {
            let _ = writeln!(out, "poll_interval_ms = {ms}");
        }
        if let Some(secs) = p.job_timeout_secs {
            let _ = writeln!(out, "job_timeout_secs = {secs}");
        }
        if let Some(strict) = p.strict_names {
            let _ = writeln!(out, "strict_names = {strict}");
        }
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Offer to store a secret in the system keyring or return it for plaintext config.
///
/// Returns `Some(secret)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_keyring_storage(
    secret: &str,
    profile_name: &str,
    kind: SecretKind,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {}?", kind.as_str()))
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        cfops_config::store_secret(profile_name, kind.as_str(), secret)?;
        eprintln!("   {} stored in system keyring", kind.as_str());
        Ok(None)
    } else {
        Ok(Some(secret.to_owned()))
    }
}

fn non_empty(field: &str, value: String) -> Result<String, CliError> {
    if value.is_empty() {
        Err(CliError::Validation {
            field: field.into(),
            reason: format!("{field} cannot be empty"),
        })
    } else {
        Ok(value)
    }
}

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("cfops configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let api: String = Input::new()
        .with_prompt("Cloud Controller API URL")
        .default("https://api.sys.example.com".into())
        .interact_text()
        .map_err(prompt_err)?;

    let auth_choices = &["Bearer token", "Username/Password (UAA)"];
    let auth_selection = Select::new()
        .with_prompt("Authentication method")
        .items(auth_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        api,
        ..Profile::default()
    };

    if auth_selection == 0 {
        let token = non_empty(
            "token",
            rpassword::prompt_password("Token: ").map_err(prompt_err)?,
        )?;
        profile.auth_mode = "token".into();
        profile.token = prompt_keyring_storage(&token, &profile_name, SecretKind::Token)?;
    } else {
        let user: String = Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_err)?;
        let pass = non_empty(
            "password",
            rpassword::prompt_password("Password: ").map_err(prompt_err)?,
        )?;
        profile.auth_mode = "password".into();
        profile.username = Some(non_empty("username", user)?);
        profile.password = prompt_keyring_storage(&pass, &profile_name, SecretKind::Password)?;
    }

    let org: String = Input::new()
        .with_prompt("Organization (blank to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let space: String = Input::new()
        .with_prompt("Space (blank to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    profile.organization = Some(org).filter(|s| !s.is_empty());
    profile.space = Some(space).filter(|s| !s.is_empty());

    let mut cfg = config::load_config_or_default();
    if cfg.profiles.is_empty() {
        cfg.default_profile = Some(profile_name.clone());
    }
    cfg.profiles.insert(profile_name.clone(), profile);
    config::save_config(&cfg)?;

    eprintln!("\n   Profile '{profile_name}' saved to {}", config_path.display());
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(format_config_redacted(&cfg).trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = config::active_profile_name(global, &cfg);
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();
            let listing = names
                .into_iter()
                .map(|name| {
                    if name == default {
                        format!("* {name}")
                    } else {
                        format!("  {name}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            output::print_output(&listing, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::print_status(&format!("Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        ConfigCommand::Target { org, space } => {
            let mut cfg = config::load_config_or_default();
            let name = config::active_profile_name(global, &cfg);
            let available = config::available_profiles(&cfg);
            let profile = cfg
                .profiles
                .get_mut(&name)
                .ok_or_else(|| CliError::ProfileNotFound {
                    name: name.clone(),
                    available,
                })?;
            if org.is_some() {
                profile.organization = org;
                // A space belongs to one organization; a new org invalidates it.
                profile.space = None;
            }
            if space.is_some() {
                profile.space = space;
            }
            let summary = format!(
                "Profile '{name}' targets org {} / space {}",
                output::or_dash(profile.organization.as_deref()),
                output::or_dash(profile.space.as_deref()),
            );
            config::save_config(&cfg)?;
            output::print_status(&summary, global.quiet);
            Ok(())
        }

        ConfigCommand::SetSecret { kind } => {
            let cfg = config::load_config_or_default();
            let name = config::active_profile_name(global, &cfg);
            let secret = non_empty(
                kind.as_str(),
                rpassword::prompt_password(format!("{}: ", kind.as_str())).map_err(prompt_err)?,
            )?;
            cfops_config::store_secret(&name, kind.as_str(), &secret)?;
            output::print_status(
                &format!("Stored {} for profile '{name}' in system keyring", kind.as_str()),
                global.quiet,
            );
            Ok(())
        }
    }
}
