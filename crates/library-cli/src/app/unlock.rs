//! Applying unlock passwords to a session cache.

use library_core::{PrivacyRecord, SessionUnlockCache, UnlockOutcome};
use tracing::debug;

use crate::constants::UNLOCK_REJECTED;

/// What a batch of unlock attempts achieved.
#[derive(Debug, Default)]
pub struct UnlockReport {
    pub accepted: usize,
    pub newly_decrypted: usize,
}

impl UnlockReport {
    pub fn any_accepted(&self) -> bool {
        self.accepted > 0
    }
}

/// Try each password in turn, telling the user about rejected ones.
pub fn unlock_with<R: PrivacyRecord>(
    cache: &mut SessionUnlockCache,
    passwords: &[impl AsRef<str>],
    records: &[R],
    quiet: bool,
) -> anyhow::Result<UnlockReport> {
    let mut report = UnlockReport::default();

    for password in passwords {
        match cache.unlock(password.as_ref(), records)? {
            UnlockOutcome::Rejected => {
                if !quiet {
                    eprintln!("{}", UNLOCK_REJECTED);
                }
            }
            UnlockOutcome::Unlocked {
                matched,
                newly_decrypted,
                failed,
            } => {
                debug!(matched, newly_decrypted, "password accepted");
                report.accepted += 1;
                report.newly_decrypted += newly_decrypted;
                if !failed.is_empty() && !quiet {
                    eprintln!(
                        "{} matching snippet(s) could not be decrypted and stay locked",
                        failed.len()
                    );
                }
            }
        }
    }

    Ok(report)
}
