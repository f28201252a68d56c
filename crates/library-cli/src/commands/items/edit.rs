use library_core::{ItemStore, NewItem, SealedContent, SessionUnlockCache};
use zeroize::Zeroizing;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{new_password, read_item_body, require_item};

use super::{seal_body, unlock_item};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let item = require_item(&store, &args.id)?;
    let was_private = item.privacy.is_private();

    let make_private = if args.public {
        false
    } else {
        args.private || was_private
    };
    if args.rekey && !make_private {
        return Err(CliError::invalid_input("--rekey only applies to private snippets").into());
    }

    let touches_body = args.body.is_some() || args.editor || args.public || args.private || args.rekey;

    let sealed = if was_private && !touches_body {
        // Metadata-only change; the ciphertext is kept as stored.
        SealedContent {
            content: item.content.clone(),
            privacy: item.privacy.clone(),
            downgraded: false,
        }
    } else {
        let mut cache = SessionUnlockCache::new();
        if was_private {
            unlock_item(ctx, &mut cache, &item)?;
        }
        let current = Zeroizing::new(
            cache
                .display_content(&item)
                .ok_or_else(|| anyhow::anyhow!("Snippet {} is locked", item.id))?
                .to_string(),
        );

        let body = if args.editor {
            Zeroizing::new(read_item_body(None, Some(current.as_str()))?)
        } else if let Some(ref body) = args.body {
            Zeroizing::new(read_item_body(Some(body.clone()), None)?)
        } else {
            current
        };

        let fresh_password;
        let password = if !make_private {
            None
        } else if args.rekey || !was_private {
            fresh_password = new_password(ctx.interactive())?;
            Some(fresh_password.as_str())
        } else {
            let unlocked = cache
                .password_for(item.id)
                .ok_or_else(|| anyhow::anyhow!("No unlocking password cached for {}", item.id))?;
            Some(unlocked)
        };

        seal_body(ctx, &body, password)?
    };

    let tags = if args.clear_tags {
        Vec::new()
    } else if !args.tag.is_empty() {
        args.tag.clone()
    } else {
        item.tags.clone()
    };
    let author = args.author.clone().unwrap_or_else(|| item.author.clone());
    let update = NewItem::sealed(sealed).with_author(author).with_tags(tags);

    let updated = store.update_item(&item.id, &update)?;
    if ctx.quiet() {
        println!("{}", updated.id);
    } else {
        println!("Updated snippet {}", updated.id);
    }
    Ok(())
}
