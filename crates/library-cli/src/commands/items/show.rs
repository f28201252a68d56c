use library_core::SessionUnlockCache;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::require_item;
use crate::output::{item_json, print_item, UiContext};

use super::unlock_item;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let item = require_item(&store, &args.id)?;

    let mut cache = SessionUnlockCache::new();
    if item.privacy.is_private() {
        unlock_item(ctx, &mut cache, &item)?;
    }

    if args.json {
        let output = serde_json::to_string_pretty(&item_json(&item, &cache))?;
        println!("{}", output);
        return Ok(());
    }

    let content = cache
        .display_content(&item)
        .ok_or_else(|| anyhow::anyhow!("Snippet {} is locked", item.id))?;
    print_item(&UiContext::from_env(), &item, content, ctx.quiet());
    Ok(())
}
