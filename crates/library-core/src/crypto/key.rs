//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every private item is encrypted under a key stretched from the item's
//! password with a fixed, library-wide salt. The salt and iteration count are
//! part of the stored format: changing either makes existing items unreadable.

use hmac::Hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{LibraryError, Result};

/// Salt shared by every private item.
pub const KEY_SALT: &[u8] = b"library-privacy-salt";

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub(crate) const KEY_LENGTH: usize = 32;

/// A cryptographic key derived from a password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the content key for a password using the library-wide salt.
///
/// # Security
///
/// - Same password always produces the same key (deterministic)
/// - 100k PBKDF2 rounds make each guess deliberately expensive
///
/// # Examples
///
/// ```
/// use library_core::crypto::derive_key;
///
/// let key = derive_key("my-password").unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str) -> Result<DerivedKey> {
    derive_key_with_salt(password, KEY_SALT)
}

/// Derive a key from a password and an explicit salt.
pub fn derive_key_with_salt(password: &str, salt: &[u8]) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(LibraryError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(
        password.as_bytes(),
        salt,
        PBKDF2_ITERATIONS,
        &mut key_bytes,
    )
    .map_err(|e| LibraryError::KeyDerivation(format!("PBKDF2 failed: {}", e)))?;

    Ok(DerivedKey::from_bytes(key_bytes))
}
