//! Application context for the Keepsake CLI.
//!
//! Bundles CLI arguments with the lazily-loaded configuration, the vault
//! service built from it, and the attempt limiter for this run. One process
//! run is one session.

use once_cell::unsync::OnceCell;

use keepsake_core::{AttemptLimiter, VaultService};

use crate::cli::Cli;
use crate::config::KeepsakeConfig;

use super::resolver::load_config;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<KeepsakeConfig>,
    vault: OnceCell<VaultService>,
    limiter: OnceCell<AttemptLimiter>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            vault: OnceCell::new(),
            limiter: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&KeepsakeConfig> {
        self.config.get_or_try_init(|| load_config(self.cli))
    }

    /// Get the vault service built from the configuration.
    pub fn vault(&self) -> anyhow::Result<&VaultService> {
        self.vault.get_or_try_init(|| {
            let config = self.config()?;
            VaultService::new(config.vault).map_err(anyhow::Error::from)
        })
    }

    /// Get this session's attempt limiter.
    pub fn limiter(&self) -> anyhow::Result<&AttemptLimiter> {
        self.limiter
            .get_or_try_init(|| Ok(self.vault()?.new_limiter()))
    }
}
