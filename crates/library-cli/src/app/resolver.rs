//! Path resolution for config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, LibraryConfig};
use crate::constants::env;
use crate::errors::CliError;

/// Resolve the config file path, checking LIBRARY_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store file path from CLI args or config.
pub fn resolve_store_path(
    cli: &Cli,
    config: Option<&LibraryConfig>,
    config_path: &Path,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_deref() {
        return Ok(PathBuf::from(path));
    }
    match config {
        Some(config) => Ok(PathBuf::from(&config.store.path)),
        None => Err(CliError::not_found(
            format!("Config file not found: {}", config_path.display()),
            "Hint: Run `library init`, or set LIBRARY_CONFIG to another config file.",
        )
        .into()),
    }
}

/// Error for a store path that does not exist yet.
pub fn missing_store_error(path: &Path) -> CliError {
    CliError::not_found(
        format!("Store file not found: {}", path.display()),
        "Hint: Run `library init`, or pass --store /path/to/library.db.",
    )
}
