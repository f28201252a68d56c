//! # Library Core
//!
//! Core library for Library - a personal snippet collection whose private
//! entries are encrypted under user-chosen passwords.
//!
//! This crate provides the privacy codec, the session unlock cache, and the
//! item store, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: Key derivation, authenticated encryption, password fingerprints
//! - **privacy**: Privacy levels, write-time sealing, session unlock cache
//! - **storage**: Item store trait and SQLite implementation

pub mod crypto;
pub mod error;
pub mod privacy;
pub mod storage;

pub use error::{LibraryError, Result};
pub use privacy::{
    EncryptionFallback, Privacy, PrivacyCodec, PrivacyLevel, PrivacyRecord, SealedContent,
    SessionUnlockCache, UnlockOutcome,
};
pub use storage::{ItemFilter, ItemStore, LibraryItem, NewItem, SortOrder, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
