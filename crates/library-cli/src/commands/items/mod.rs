//! Snippet command handlers.

pub mod add;
pub mod delete;
pub mod edit;
pub mod like;
pub mod list;
pub mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use like::handle_like;
pub use list::handle_list;
pub use show::handle_show;

use library_core::{EncryptionFallback, LibraryItem, SealedContent, SessionUnlockCache};

use crate::app::{unlock_with, AppContext};
use crate::errors::CliError;
use crate::helpers::{confirm, unlock_passwords};
use crate::output::print_warning;

/// Seal a body for storage, applying the configured encryption fallback.
fn seal_body(
    ctx: &AppContext,
    body: &str,
    password: Option<&str>,
) -> anyhow::Result<SealedContent> {
    let codec = ctx.codec()?;
    let sealed = match ctx.encryption_fallback()? {
        EncryptionFallback::Reject => codec.seal(body, password)?,
        EncryptionFallback::ConfirmPublic => {
            let interactive = ctx.interactive();
            codec.seal_or_downgrade(body, password, |err| {
                eprintln!("{}", err);
                confirm(
                    "Encryption failed. Save this snippet publicly instead?",
                    interactive,
                )
                .unwrap_or(false)
            })?
        }
    };
    if sealed.downgraded {
        print_warning(
            "Snippet was saved publicly because encryption failed",
            ctx.quiet(),
        );
    }
    Ok(sealed)
}

/// Ask for passwords until `item` is unlocked in `cache`, or fail with an
/// auth error.
fn unlock_item(
    ctx: &AppContext,
    cache: &mut SessionUnlockCache,
    item: &LibraryItem,
) -> anyhow::Result<()> {
    let passwords = unlock_passwords(ctx.interactive())?;
    let passwords: Vec<&str> = passwords.iter().map(|p| p.as_str()).collect();
    unlock_with(cache, &passwords, std::slice::from_ref(item), ctx.quiet())?;

    if !cache.is_unlocked(item.id) {
        return Err(CliError::auth_failed_with_hint(
            format!("Snippet {} is private and could not be unlocked", item.id),
            "Hint: Enter the password it was saved with, or set LIBRARY_UNLOCK.",
        )
        .into());
    }
    Ok(())
}
