use library_core::ItemStore;

use crate::app::AppContext;
use crate::cli::LikeArgs;
use crate::helpers::resolve_item_id;

pub fn handle_like(ctx: &AppContext, args: &LikeArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let id = resolve_item_id(&store, &args.id)?;

    let likes = if args.undo {
        store.unlike_item(&id)?
    } else {
        store.like_item(&id)?
    };

    if ctx.quiet() {
        println!("{}", likes);
    } else {
        println!("Snippet {} now has {} like(s)", id, likes);
    }
    Ok(())
}
