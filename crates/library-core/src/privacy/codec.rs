//! The privacy codec: write-time sealing and read-time opening of item bodies.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Privacy;
use crate::crypto::{self, normalize_password, FingerprintScheme};
use crate::error::{LibraryError, Result};

/// What to do when a private write cannot be encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionFallback {
    /// Fail the write.
    #[default]
    Reject,
    /// Ask the user whether to store the item publicly instead.
    ConfirmPublic,
}

/// Content and privacy columns ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedContent {
    pub content: String,
    pub privacy: Privacy,
    /// Set when a private write was stored publicly after an encryption failure.
    pub downgraded: bool,
}

/// Turns plaintext plus password into ciphertext plus fingerprint, and back.
///
/// The codec holds no mutable state; every call derives its own key.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivacyCodec {
    scheme: FingerprintScheme,
}

impl PrivacyCodec {
    /// Create a codec that writes fingerprints with `scheme`.
    ///
    /// Reading accepts fingerprints of every scheme regardless.
    pub fn new(scheme: FingerprintScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> FingerprintScheme {
        self.scheme
    }

    pub fn encrypt(&self, plaintext: &str, password: &str) -> Result<String> {
        crypto::encrypt(plaintext, password)
    }

    /// `None` means wrong password or unreadable blob.
    pub fn decrypt(&self, blob: &str, password: &str) -> Option<String> {
        crypto::decrypt(blob, password)
    }

    pub fn fingerprint(&self, password: &str) -> Result<String> {
        crypto::fingerprint(password, self.scheme)
    }

    /// Prepare an item body for storage.
    ///
    /// With no password the body is stored publicly as-is. With a password
    /// the body is encrypted and the password fingerprinted; any failure is
    /// returned and nothing is downgraded.
    pub fn seal(&self, plaintext: &str, password: Option<&str>) -> Result<SealedContent> {
        let Some(password) = password else {
            return Ok(SealedContent {
                content: plaintext.to_string(),
                privacy: Privacy::Public,
                downgraded: false,
            });
        };
        let password = normalize_password(password)?;

        let content = self.encrypt(plaintext, password)?;
        let fingerprint = self.fingerprint(password)?;
        debug!(scheme = %self.scheme, "sealed private content");

        Ok(SealedContent {
            content,
            privacy: Privacy::Private { fingerprint },
            downgraded: false,
        })
    }

    /// Like [`seal`](Self::seal), but on an encryption or key derivation
    /// failure asks `confirm` whether to store the body publicly instead.
    ///
    /// Declining returns the original error.
    pub fn seal_or_downgrade<F>(
        &self,
        plaintext: &str,
        password: Option<&str>,
        confirm: F,
    ) -> Result<SealedContent>
    where
        F: FnOnce(&LibraryError) -> bool,
    {
        downgrade_on_failure(self.seal(plaintext, password), plaintext, confirm)
    }
}

/// Turn an encryption or key derivation failure into a public body when
/// `confirm` agrees. Other errors and successes pass through untouched.
fn downgrade_on_failure<F>(
    result: Result<SealedContent>,
    plaintext: &str,
    confirm: F,
) -> Result<SealedContent>
where
    F: FnOnce(&LibraryError) -> bool,
{
    match result {
        Err(err @ (LibraryError::Encryption(_) | LibraryError::KeyDerivation(_))) => {
            if !confirm(&err) {
                return Err(err);
            }
            warn!(error = %err, "encryption failed; storing item as public after confirmation");
            Ok(SealedContent {
                content: plaintext.to_string(),
                privacy: Privacy::Public,
                downgraded: true,
            })
        }
        other => other,
    }
}
