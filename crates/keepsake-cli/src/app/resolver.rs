//! Config path resolution.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, KeepsakeConfig};
use crate::errors::CliError;

/// Resolve the config file path: `--config` / KEEPSAKE_CONFIG, else the XDG default.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(value) = explicit_config(cli) {
        return Ok(PathBuf::from(value));
    }
    default_config_path()
}

/// Load the config file.
///
/// A missing default config means "use defaults"; a missing explicit config
/// is an error.
pub fn load_config(cli: &Cli) -> anyhow::Result<KeepsakeConfig> {
    let path = resolve_config_path(cli)?;
    if path.exists() {
        debug!(path = %path.display(), "loading config");
        return read_config(&path);
    }
    if explicit_config(cli).is_some() {
        return Err(CliError::not_found(
            format!("Config file not found: {}", path.display()),
            "Hint: Remove --config / KEEPSAKE_CONFIG to use the defaults.",
        )
        .into());
    }
    debug!(path = %path.display(), "no config file; using defaults");
    Ok(KeepsakeConfig::default())
}

fn explicit_config(cli: &Cli) -> Option<&str> {
    cli.config
        .as_deref()
        .filter(|value| !value.trim().is_empty())
}
