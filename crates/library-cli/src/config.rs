use std::path::{Path, PathBuf};

use library_core::crypto::FingerprintScheme;
use library_core::EncryptionFallback;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub privacy: PrivacySection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PrivacySection {
    /// Scheme used to fingerprint passwords of new private snippets
    #[serde(default)]
    pub fingerprint: FingerprintScheme,
    /// What to do when encrypting a private snippet fails
    #[serde(default)]
    pub encryption_fallback: EncryptionFallback,
}

impl LibraryConfig {
    pub fn new(
        store_path: PathBuf,
        fingerprint: FingerprintScheme,
        encryption_fallback: EncryptionFallback,
    ) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            privacy: PrivacySection {
                fingerprint,
                encryption_fallback,
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("library.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<LibraryConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &LibraryConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("library"));
        }
    }
    Ok(home_dir()?.join(".config").join("library"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("library"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("library"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
