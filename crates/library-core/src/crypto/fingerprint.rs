//! Password fingerprints.
//!
//! A fingerprint is a deterministic digest of a password alone. It is stored
//! as the item's `privacy_key` and compared during unlock, so the same
//! password must always produce the same string.
//!
//! Two schemes exist and the stored string says which one produced it:
//!
//! | Scheme | Stored form |
//! |---|---|
//! | `sha256` | 64 lowercase hex chars of SHA-256(password) |
//! | `argon2id` | `argon2id$` + 64 hex chars of Argon2id(password, fixed salt) |
//!
//! `sha256` is a fast hash and therefore a cheap guessing oracle. It is still
//! accepted for reading so older items keep unlocking.

use std::fmt;

use argon2::Argon2;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{LibraryError, Result};

const ARGON2_PREFIX: &str = "argon2id$";

/// Salt for Argon2id fingerprints. Distinct from the content key salt.
const FINGERPRINT_SALT: &[u8] = b"library-privacy-fingerprint";

const ARGON2_MEMORY_KB: u32 = 19 * 1024;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

const DIGEST_LENGTH: usize = 32;

/// Hashing scheme used to fingerprint a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintScheme {
    /// Single SHA-256, hex encoded.
    Sha256,
    /// Argon2id with a fixed salt, prefixed and hex encoded.
    #[default]
    Argon2id,
}

impl FingerprintScheme {
    /// Identify the scheme that produced a stored fingerprint.
    pub fn detect(stored: &str) -> Option<Self> {
        if let Some(digest) = stored.strip_prefix(ARGON2_PREFIX) {
            return is_hex_digest(digest).then_some(FingerprintScheme::Argon2id);
        }
        is_hex_digest(stored).then_some(FingerprintScheme::Sha256)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FingerprintScheme::Sha256 => "sha256",
            FingerprintScheme::Argon2id => "argon2id",
        }
    }
}

impl fmt::Display for FingerprintScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fingerprint a password with the given scheme.
///
/// # Errors
///
/// - `LibraryError::InvalidInput` for an empty password
/// - `LibraryError::KeyDerivation` if Argon2 rejects its parameters
pub fn fingerprint(password: &str, scheme: FingerprintScheme) -> Result<String> {
    if password.is_empty() {
        return Err(LibraryError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    match scheme {
        FingerprintScheme::Sha256 => Ok(hex::encode(Sha256::digest(password.as_bytes()))),
        FingerprintScheme::Argon2id => {
            let params = argon2::Params::new(
                ARGON2_MEMORY_KB,
                ARGON2_ITERATIONS,
                ARGON2_PARALLELISM,
                Some(DIGEST_LENGTH),
            )
            .map_err(|e| {
                LibraryError::KeyDerivation(format!("Failed to create Argon2 params: {}", e))
            })?;
            let argon2 =
                Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

            let mut digest = [0u8; DIGEST_LENGTH];
            argon2
                .hash_password_into(password.as_bytes(), FINGERPRINT_SALT, &mut digest)
                .map_err(|e| {
                    LibraryError::KeyDerivation(format!("Fingerprint derivation failed: {}", e))
                })?;

            Ok(format!("{}{}", ARGON2_PREFIX, hex::encode(digest)))
        }
    }
}

/// Check a password against a stored fingerprint of either scheme.
///
/// Unrecognized fingerprints never match.
pub fn verify_fingerprint(stored: &str, password: &str) -> Result<bool> {
    match FingerprintScheme::detect(stored) {
        Some(scheme) => Ok(fingerprint(password, scheme)? == stored),
        None => Ok(false),
    }
}

fn is_hex_digest(value: &str) -> bool {
    value.len() == DIGEST_LENGTH * 2
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        // sha256("secret123")
        assert_eq!(
            fingerprint("secret123", FingerprintScheme::Sha256).unwrap(),
            "fcf730b6d95236ecd3c9fc2d92d7b6b2bb061514961aec041d6c7a7192f592e4"
        );
    }

    #[test]
    fn test_fingerprint_deterministic() {
        for scheme in [FingerprintScheme::Sha256, FingerprintScheme::Argon2id] {
            let first = fingerprint("secret123", scheme).unwrap();
            let second = fingerprint("secret123", scheme).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_different_passwords_different_fingerprints() {
        for scheme in [FingerprintScheme::Sha256, FingerprintScheme::Argon2id] {
            let a = fingerprint("password-one", scheme).unwrap();
            let b = fingerprint("password-two", scheme).unwrap();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_detect_scheme() {
        let legacy = fingerprint("pw", FingerprintScheme::Sha256).unwrap();
        let hardened = fingerprint("pw", FingerprintScheme::Argon2id).unwrap();

        assert_eq!(
            FingerprintScheme::detect(&legacy),
            Some(FingerprintScheme::Sha256)
        );
        assert_eq!(
            FingerprintScheme::detect(&hardened),
            Some(FingerprintScheme::Argon2id)
        );
        assert_eq!(FingerprintScheme::detect("not-a-fingerprint"), None);
        assert_eq!(FingerprintScheme::detect("argon2id$abc"), None);
        assert_eq!(FingerprintScheme::detect(&legacy.to_uppercase()), None);
    }

    #[test]
    fn test_verify_across_schemes() {
        let legacy = fingerprint("pw-1", FingerprintScheme::Sha256).unwrap();
        let hardened = fingerprint("pw-1", FingerprintScheme::Argon2id).unwrap();

        assert!(verify_fingerprint(&legacy, "pw-1").unwrap());
        assert!(verify_fingerprint(&hardened, "pw-1").unwrap());
        assert!(!verify_fingerprint(&legacy, "pw-2").unwrap());
        assert!(!verify_fingerprint(&hardened, "pw-2").unwrap());
        assert!(!verify_fingerprint("garbage", "pw-1").unwrap());
    }

    #[test]
    fn test_hardened_fingerprint_is_not_the_content_key() {
        let hardened = fingerprint("pw-1", FingerprintScheme::Argon2id).unwrap();
        let key = crate::crypto::derive_key("pw-1").unwrap();

        assert!(!hardened.contains(&hex::encode(key.as_bytes())));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(fingerprint("", FingerprintScheme::Sha256).is_err());
        assert!(fingerprint("", FingerprintScheme::Argon2id).is_err());
    }
}
