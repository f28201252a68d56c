//! Error types for Library core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages.
//!
//! A wrong password is not an error: decryption reports it as `None`.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for Library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Core error type for Library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The key-stretching primitive rejected its inputs or failed
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Authenticated encryption failed
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Item not found by ID
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::Storage(err.to_string())
    }
}
