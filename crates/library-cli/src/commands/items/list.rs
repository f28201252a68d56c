use library_core::{ItemFilter, ItemStore, LibraryItem, SessionUnlockCache};

use crate::app::{unlock_with, AppContext};
use crate::cli::ListArgs;
use crate::helpers::unlock_passwords;
use crate::output::{items_json, print_item_list, UiContext};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    // The limit applies to visible snippets, so it is not pushed into the query.
    let mut filter = ItemFilter::new().sort(args.sort.into());
    for tag in &args.tag {
        filter = filter.tag(tag.clone());
    }
    if let Some(ref author) = args.author {
        filter = filter.author(author.clone());
    }
    let items = store.list_items(&filter)?;

    let mut cache = SessionUnlockCache::new();
    if args.unlock && items.iter().any(|item| item.privacy.is_private()) {
        let passwords = unlock_passwords(ctx.interactive())?;
        let passwords: Vec<&str> = passwords.iter().map(|p| p.as_str()).collect();
        unlock_with(&mut cache, &passwords, &items, ctx.quiet())?;
    }

    let visible: Vec<&LibraryItem> = cache
        .visible(&items)
        .take(args.limit.unwrap_or(usize::MAX))
        .collect();
    let hidden = items.len() - cache.visible(&items).count();

    if args.json {
        let output = serde_json::to_string_pretty(&items_json(&visible, &cache))?;
        println!("{}", output);
    } else {
        print_item_list(
            &UiContext::from_env(),
            &visible,
            &cache,
            hidden,
            "use --unlock to show them",
            ctx.quiet(),
        );
    }
    Ok(())
}
