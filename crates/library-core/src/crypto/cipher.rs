//! AES-256-GCM encryption of item bodies.
//!
//! Stored blob layout, base64-encoded as a whole:
//!
//! ```text
//! [ nonce (12 bytes) | ciphertext + tag (16 bytes) ]
//! ```
//!
//! There is no delimiter; the nonce length is fixed.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::key::{derive_key, DerivedKey};
use crate::error::{LibraryError, Result};

/// Nonce length in bytes (96 bits, the GCM standard size).
pub const NONCE_LENGTH: usize = 12;

const TAG_LENGTH: usize = 16;

/// Encrypt `plaintext` under a key derived from `password`.
///
/// Each call draws a fresh random nonce, so encrypting the same plaintext
/// twice yields different blobs.
///
/// # Errors
///
/// - `LibraryError::InvalidInput` for an empty password
/// - `LibraryError::KeyDerivation` if key stretching fails
/// - `LibraryError::Encryption` if nonce generation or AES-GCM fails
///
/// # Examples
///
/// ```
/// use library_core::crypto::{decrypt, encrypt};
///
/// let blob = encrypt("hello world", "secret123").unwrap();
/// assert_eq!(decrypt(&blob, "secret123").as_deref(), Some("hello world"));
/// assert_eq!(decrypt(&blob, "wrong"), None);
/// ```
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    let key = derive_key(password)?;
    encrypt_with_key(plaintext, &key)
}

/// Encrypt `plaintext` under an already derived key.
pub fn encrypt_with_key(plaintext: &str, key: &DerivedKey) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LibraryError::Encryption(format!("Invalid key length: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| LibraryError::Encryption(format!("Nonce generation failed: {}", e)))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|e| LibraryError::Encryption(format!("AES-GCM encryption failed: {}", e)))?;

    let mut blob = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(blob))
}

/// Decrypt a blob produced by [`encrypt`] with a password guess.
///
/// Returns `None` for a wrong password, a corrupted or truncated blob,
/// invalid base64, or plaintext that is not UTF-8. The caller cannot tell
/// these apart.
pub fn decrypt(blob: &str, password: &str) -> Option<String> {
    let key = derive_key(password).ok()?;
    decrypt_with_key(blob, &key)
}

/// Decrypt a blob with an already derived key.
pub fn decrypt_with_key(blob: &str, key: &DerivedKey) -> Option<String> {
    let data = STANDARD.decode(blob.as_bytes()).ok()?;
    if data.len() < NONCE_LENGTH + TAG_LENGTH {
        return None;
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LENGTH);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).ok()?;
    let plaintext = Zeroizing::new(
        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .ok()?,
    );

    std::str::from_utf8(&plaintext).ok().map(str::to_owned)
}
