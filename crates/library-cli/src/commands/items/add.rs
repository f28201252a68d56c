use library_core::{ItemStore, NewItem};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{new_password, read_item_body};

use super::seal_body;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;

    let body = read_item_body(args.body.clone(), None)?;
    let password = if args.private {
        Some(new_password(ctx.interactive())?)
    } else {
        None
    };

    let sealed = seal_body(ctx, &body, password.as_deref().map(String::as_str))?;
    let mut new_item = NewItem::sealed(sealed).with_tags(args.tag.clone());
    if let Some(ref author) = args.author {
        new_item = new_item.with_author(author.clone());
    }

    let item = store.insert_item(&new_item)?;
    if ctx.quiet() {
        println!("{}", item.id);
    } else if item.privacy.is_private() {
        println!("Added private snippet {}", item.id);
    } else {
        println!("Added snippet {}", item.id);
    }
    Ok(())
}
