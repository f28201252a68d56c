//! Cryptographic operations for private library items.
//!
//! This module provides the primitives behind the privacy codec using
//! well-audited libraries:
//! - **PBKDF2-HMAC-SHA256**: key stretching for the content key
//! - **AES-256-GCM**: authenticated encryption of item bodies
//! - **Argon2id / SHA-256**: password fingerprints stored next to ciphertext
//!
//! ## Security Model
//!
//! - Password-based encryption with a fresh 96-bit nonce per write
//! - Wrong passwords fail closed: the GCM tag never verifies
//! - Derived keys are zeroized from memory on drop
//! - No plaintext passwords are stored; only fingerprints
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the item table (ciphertext + fingerprints)
//! - Tampering with stored ciphertext
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory
//! - Offline guessing against legacy SHA-256 fingerprints

pub mod cipher;
pub mod fingerprint;
pub mod key;
pub mod password;

pub use cipher::{decrypt, decrypt_with_key, encrypt, encrypt_with_key, NONCE_LENGTH};
pub use fingerprint::{fingerprint, verify_fingerprint, FingerprintScheme};
pub use key::{derive_key, DerivedKey};
pub use password::normalize_password;
