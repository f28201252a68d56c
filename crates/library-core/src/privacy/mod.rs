//! Privacy levels, the privacy codec, and the session unlock cache.
//!
//! A private item stores ciphertext in `content` and a password fingerprint
//! in `privacy_key`. A public item stores plaintext and no key. [`Privacy`]
//! makes the two states the only representable ones.

mod codec;
mod session;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LibraryError, Result};

pub use codec::{EncryptionFallback, PrivacyCodec, SealedContent};
pub use session::{SessionUnlockCache, UnlockOutcome};

/// Stored privacy level of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    Public,
    Private,
}

impl PrivacyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Public => "public",
            PrivacyLevel::Private => "private",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = LibraryError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "public" => Ok(PrivacyLevel::Public),
            "private" => Ok(PrivacyLevel::Private),
            other => Err(LibraryError::Validation(format!(
                "Unknown privacy level: {}",
                other
            ))),
        }
    }
}

/// Privacy state of an item: public, or private under a password fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Privacy {
    #[default]
    Public,
    Private {
        fingerprint: String,
    },
}

impl Privacy {
    pub fn level(&self) -> PrivacyLevel {
        match self {
            Privacy::Public => PrivacyLevel::Public,
            Privacy::Private { .. } => PrivacyLevel::Private,
        }
    }

    /// The stored `privacy_key` column value.
    pub fn key(&self) -> Option<&str> {
        match self {
            Privacy::Public => None,
            Privacy::Private { fingerprint } => Some(fingerprint),
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Privacy::Private { .. })
    }

    /// Rebuild privacy from the `privacy_level` / `privacy_key` columns.
    ///
    /// A missing level means public (rows written before privacy existed).
    /// The key must be present exactly when the level is private.
    pub fn from_columns(level: Option<&str>, key: Option<String>) -> Result<Self> {
        let level = match level {
            Some(value) => value.parse()?,
            None => PrivacyLevel::Public,
        };
        let key = key.filter(|value| !value.is_empty());

        match (level, key) {
            (PrivacyLevel::Public, None) => Ok(Privacy::Public),
            (PrivacyLevel::Public, Some(_)) => Err(LibraryError::Validation(
                "Public item must not carry a privacy key".to_string(),
            )),
            (PrivacyLevel::Private, Some(fingerprint)) => Ok(Privacy::Private { fingerprint }),
            (PrivacyLevel::Private, None) => Err(LibraryError::Validation(
                "Private item is missing its privacy key".to_string(),
            )),
        }
    }
}

/// A stored record the unlock cache can work on.
pub trait PrivacyRecord {
    fn record_id(&self) -> Uuid;

    /// Plaintext for public records, ciphertext blob for private ones.
    fn content(&self) -> &str;

    fn privacy(&self) -> &Privacy;
}
