//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use cfops_core::RouteRef;

use crate::cli::{GlobalOpts, RouteArgs};
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, action: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.to_owned(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Parse `-c` parameters: inline JSON, or the contents of `--config-file`.
pub fn json_params(
    inline: Option<&str>,
    file: Option<&Path>,
) -> Result<Option<serde_json::Value>, CliError> {
    let raw = match (inline, file) {
        (Some(text), _) => text.to_owned(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Ok(None),
    };
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    if !value.is_object() {
        return Err(CliError::Validation {
            field: "parameters".into(),
            reason: "expected a JSON object".into(),
        });
    }
    Ok(Some(value))
}

impl From<RouteArgs> for RouteRef {
    fn from(args: RouteArgs) -> Self {
        Self {
            domain: args.domain,
            host: args.host.unwrap_or_default(),
            path: args.path.unwrap_or_default(),
            port: args.port,
        }
    }
}

/// Run `fut` behind a stderr spinner (interactive, non-quiet sessions only).
pub async fn with_spinner<T, F>(message: &str, global: &GlobalOpts, fut: F) -> T
where
    F: Future<Output = T>,
{
    if global.quiet || !std::io::stderr().is_terminal() {
        return fut.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}
