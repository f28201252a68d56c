//! Application context for the Library CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::io::IsTerminal;
use std::path::PathBuf;

use library_core::{EncryptionFallback, ItemStore, PrivacyCodec, SqliteStore};
use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::{read_config, LibraryConfig};

use super::resolver::{missing_store_error, resolve_config_path, resolve_store_path};

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<LibraryConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts can be shown.
    pub fn interactive(&self) -> bool {
        std::io::stdin().is_terminal()
    }

    /// The config file, if one exists. Loaded on first use.
    pub fn config(&self) -> anyhow::Result<Option<&LibraryConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                read_config(&path).map(Some)
            } else {
                Ok(None)
            }
        })?;
        Ok(config.as_ref())
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        let config_path = resolve_config_path()?;
        resolve_store_path(self.cli, self.config()?, &config_path)
    }

    /// Open the configured store.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.store_path()?;
        if !path.exists() {
            return Err(missing_store_error(&path).into());
        }
        Ok(SqliteStore::open(&path)?)
    }

    /// Codec writing fingerprints with the configured scheme.
    pub fn codec(&self) -> anyhow::Result<PrivacyCodec> {
        let scheme = self
            .config()?
            .map(|config| config.privacy.fingerprint)
            .unwrap_or_default();
        Ok(PrivacyCodec::new(scheme))
    }

    pub fn encryption_fallback(&self) -> anyhow::Result<EncryptionFallback> {
        Ok(self
            .config()?
            .map(|config| config.privacy.encryption_fallback)
            .unwrap_or_default())
    }
}
