use library_core::ItemStore;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::{confirm, require_item};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let item = require_item(&store, &args.id)?;

    if !args.force {
        if !ctx.interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation\nHint: Pass --force in scripts.",
            )
            .into());
        }
        if !confirm(&format!("Delete snippet {}?", item.id), true)? {
            if !ctx.quiet() {
                println!("Aborted.");
            }
            return Ok(());
        }
    }

    store.delete_item(&item.id)?;
    if !ctx.quiet() {
        println!("Deleted snippet {}", item.id);
    }
    Ok(())
}
