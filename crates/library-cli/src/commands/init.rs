use std::path::PathBuf;

use library_core::crypto::FingerprintScheme;
use library_core::{EncryptionFallback, ItemStore, SqliteStore};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, LibraryConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let store_path = match args.path.as_deref().or(ctx.cli().store.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };

    let created = if store_path.exists() {
        // Refuse to point the config at something that is not a store.
        SqliteStore::open(&store_path)?;
        false
    } else {
        SqliteStore::create(&store_path)?;
        true
    };

    let fingerprint = args
        .fingerprint
        .map(FingerprintScheme::from)
        .unwrap_or_default();
    let fallback = if args.confirm_public_fallback {
        EncryptionFallback::ConfirmPublic
    } else {
        EncryptionFallback::Reject
    };
    let config = LibraryConfig::new(store_path.clone(), fingerprint, fallback);
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        if created {
            println!("Initialized new library at {}", store_path.display());
        } else {
            println!("Using existing library at {}", store_path.display());
        }
        println!("Config written to {}", config_path.display());
    }
    Ok(())
}
