//! Session unlock cache.
//!
//! Holds the passwords a user has proven during one session and the
//! plaintext they unlocked. Nothing here is ever persisted; dropping the
//! cache zeroizes every password, derived key, and plaintext it holds.

use std::collections::HashMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::{Privacy, PrivacyRecord};
use crate::crypto::{
    decrypt_with_key, derive_key, fingerprint, normalize_password, DerivedKey, FingerprintScheme,
};
use crate::error::Result;

/// Result of an unlock attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// No private item accepted the password. The password was discarded.
    Rejected,
    /// The password unlocked at least one private item.
    Unlocked {
        /// Private items whose fingerprint matched the password.
        matched: usize,
        /// Items decrypted by this call (0 when all were already unlocked).
        newly_decrypted: usize,
        /// Items whose fingerprint matched but whose ciphertext did not open.
        failed: Vec<Uuid>,
    },
}

impl UnlockOutcome {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, UnlockOutcome::Unlocked { .. })
    }
}

struct UnlockedPassword {
    secret: SecretString,
    fingerprints: HashMap<FingerprintScheme, String>,
    key: Option<DerivedKey>,
}

impl UnlockedPassword {
    fn new(password: &str) -> Self {
        Self {
            secret: SecretString::from(password.to_string()),
            fingerprints: HashMap::new(),
            key: None,
        }
    }

    fn is(&self, password: &str) -> bool {
        self.secret.expose_secret() == password
    }

    /// Compare against a stored fingerprint, hashing at most once per scheme.
    fn matches(&mut self, stored: &str) -> Result<bool> {
        let Some(scheme) = FingerprintScheme::detect(stored) else {
            return Ok(false);
        };
        if let Some(value) = self.fingerprints.get(&scheme) {
            return Ok(value == stored);
        }
        let value = fingerprint(self.secret.expose_secret(), scheme)?;
        let matched = value == stored;
        self.fingerprints.insert(scheme, value);
        Ok(matched)
    }

    /// The content key, derived on first use.
    fn key(&mut self) -> Result<&DerivedKey> {
        let key = match self.key.take() {
            Some(key) => key,
            None => derive_key(self.secret.expose_secret())?,
        };
        Ok(self.key.insert(key))
    }
}

struct DecryptedEntry {
    plaintext: Zeroizing<String>,
    /// Ciphertext the plaintext came from; a mismatch means the item changed.
    source: String,
    /// Index into `SessionUnlockCache::passwords`.
    password: usize,
}

/// Passwords proven this session and the plaintext they unlocked.
///
/// Owned by whichever view or command is showing items; create it empty when
/// the view starts and drop it when the view ends.
#[derive(Default)]
pub struct SessionUnlockCache {
    passwords: Vec<UnlockedPassword>,
    decrypted: HashMap<Uuid, DecryptedEntry>,
}

impl SessionUnlockCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try a password against every private record.
    ///
    /// The input is trimmed. Records whose stored fingerprint matches are
    /// decrypted and cached. The password joins the unlocked set only if at
    /// least one record actually opened with it; otherwise it is dropped and
    /// the outcome is [`UnlockOutcome::Rejected`]. Repeating a successful
    /// unlock changes nothing, and a password already in the unlocked set is
    /// never reported as rejected, even if its records have since gone.
    ///
    /// # Errors
    ///
    /// - `LibraryError::InvalidInput` for blank input
    /// - `LibraryError::KeyDerivation` if fingerprinting or key stretching fails
    pub fn unlock<R: PrivacyRecord>(&mut self, input: &str, records: &[R]) -> Result<UnlockOutcome> {
        let password = normalize_password(input)?;
        let existing = self.passwords.iter().position(|p| p.is(password));
        let index = existing.unwrap_or(self.passwords.len());

        let mut fresh = None;
        let candidate = match existing {
            Some(index) => &mut self.passwords[index],
            None => fresh.insert(UnlockedPassword::new(password)),
        };

        let mut matched = 0;
        let mut pending = Vec::new();
        for record in records {
            let Privacy::Private { fingerprint } = record.privacy() else {
                continue;
            };
            if !candidate.matches(fingerprint)? {
                continue;
            }
            matched += 1;
            let current = self
                .decrypted
                .get(&record.record_id())
                .is_some_and(|entry| entry.source == record.content());
            if !current {
                pending.push(record);
            }
        }

        if matched == 0 && existing.is_none() {
            debug!("password matched no private items");
            return Ok(UnlockOutcome::Rejected);
        }

        let mut staged = Vec::new();
        let mut failed = Vec::new();
        if !pending.is_empty() {
            let key = candidate.key()?;
            for record in pending {
                let id = record.record_id();
                match decrypt_with_key(record.content(), key) {
                    Some(plaintext) => staged.push((
                        id,
                        DecryptedEntry {
                            plaintext: Zeroizing::new(plaintext),
                            source: record.content().to_string(),
                            password: index,
                        },
                    )),
                    None => {
                        warn!(item = %id, "fingerprint matched but decryption failed");
                        failed.push(id);
                    }
                }
            }
        }

        for id in &failed {
            self.decrypted.remove(id);
        }
        let already_unlocked = matched - staged.len() - failed.len();
        if staged.is_empty() && already_unlocked == 0 && existing.is_none() {
            return Ok(UnlockOutcome::Rejected);
        }

        let newly_decrypted = staged.len();
        if let Some(unlocked) = fresh {
            self.passwords.push(unlocked);
        }
        self.decrypted.extend(staged);

        debug!(matched, newly_decrypted, failed = failed.len(), "unlocked private items");
        Ok(UnlockOutcome::Unlocked {
            matched,
            newly_decrypted,
            failed,
        })
    }

    /// Bring the cache in line with a fresh set of records.
    ///
    /// Entries for records that disappeared, became public, or whose
    /// ciphertext changed are dropped. Private records not yet decrypted are
    /// retried with every unlocked password whose fingerprint matches.
    /// Returns how many records were (re)decrypted.
    pub fn reconcile<R: PrivacyRecord>(&mut self, records: &[R]) -> Result<usize> {
        let current: HashMap<Uuid, &R> = records.iter().map(|r| (r.record_id(), r)).collect();
        let before = self.decrypted.len();
        self.decrypted.retain(|id, entry| {
            current
                .get(id)
                .is_some_and(|r| r.privacy().is_private() && r.content() == entry.source)
        });
        let dropped = before - self.decrypted.len();

        let mut restored = 0;
        for record in records {
            let Privacy::Private { fingerprint } = record.privacy() else {
                continue;
            };
            let id = record.record_id();
            if self.decrypted.contains_key(&id) {
                continue;
            }
            for (index, unlocked) in self.passwords.iter_mut().enumerate() {
                if !unlocked.matches(fingerprint)? {
                    continue;
                }
                if let Some(plaintext) = decrypt_with_key(record.content(), unlocked.key()?) {
                    self.decrypted.insert(
                        id,
                        DecryptedEntry {
                            plaintext: Zeroizing::new(plaintext),
                            source: record.content().to_string(),
                            password: index,
                        },
                    );
                    restored += 1;
                    break;
                }
            }
        }

        debug!(dropped, restored, "reconciled unlock cache");
        Ok(restored)
    }

    /// Forget every password and every decrypted item.
    pub fn clear_all(&mut self) {
        self.passwords.clear();
        self.decrypted.clear();
    }

    pub fn is_unlocked(&self, id: Uuid) -> bool {
        self.decrypted.contains_key(&id)
    }

    pub fn plaintext_for(&self, id: Uuid) -> Option<&str> {
        self.decrypted.get(&id).map(|entry| entry.plaintext.as_str())
    }

    /// The password that unlocked an item, for re-encrypting it after an edit.
    pub fn password_for(&self, id: Uuid) -> Option<&str> {
        self.decrypted
            .get(&id)
            .and_then(|entry| self.passwords.get(entry.password))
            .map(|unlocked| unlocked.secret.expose_secret())
    }

    /// Text to show for a record: public content, or cached plaintext for an
    /// unlocked private record whose ciphertext has not changed since.
    pub fn display_content<'a, R: PrivacyRecord>(&'a self, record: &'a R) -> Option<&'a str> {
        match record.privacy() {
            Privacy::Public => Some(record.content()),
            Privacy::Private { .. } => self
                .decrypted
                .get(&record.record_id())
                .filter(|entry| entry.source == record.content())
                .map(|entry| entry.plaintext.as_str()),
        }
    }

    /// Public records plus private records this session has unlocked.
    pub fn visible<'a, R: PrivacyRecord>(
        &'a self,
        records: &'a [R],
    ) -> impl Iterator<Item = &'a R> + 'a {
        records
            .iter()
            .filter(move |record| self.display_content(*record).is_some())
    }

    pub fn unlocked_password_count(&self) -> usize {
        self.passwords.len()
    }

    pub fn decrypted_count(&self) -> usize {
        self.decrypted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty() && self.decrypted.is_empty()
    }
}

impl fmt::Debug for SessionUnlockCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionUnlockCache")
            .field("unlocked_passwords", &self.passwords.len())
            .field("decrypted_items", &self.decrypted.len())
            .finish()
    }
}
