//! Text and table output formatting for snippets.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use library_core::{LibraryItem, SessionUnlockCache};
use owo_colors::OwoColorize;

use crate::constants::PREVIEW_CHARS;

use super::UiContext;

const PRIVATE_MARKER: &str = "[private]";

/// First line of `content`, cut to `max` characters.
pub fn preview(content: &str, max: usize) -> String {
    let line = content.lines().next().unwrap_or("");
    let mut out: String = line.chars().take(max).collect();
    if line.chars().count() > max || content.lines().nth(1).is_some() {
        out.push_str("...");
    }
    out
}

fn short_id(item: &LibraryItem) -> String {
    item.id.to_string().chars().take(8).collect()
}

fn marker(ui: &UiContext) -> String {
    if ui.color {
        PRIVATE_MARKER.green().to_string()
    } else {
        PRIVATE_MARKER.to_string()
    }
}

/// Print the visible snippets, then a note about hidden private ones.
pub fn print_item_list(
    ui: &UiContext,
    items: &[&LibraryItem],
    cache: &SessionUnlockCache,
    hidden: usize,
    unlock_hint: &str,
    quiet: bool,
) {
    if items.is_empty() {
        if !quiet {
            println!("No snippets found.");
        }
    } else if ui.pretty {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["ID", "Likes", "Author", "Tags", "Content"]);
        for item in items {
            table.add_row(vec![
                short_id(item),
                item.likes.to_string(),
                item.author.clone(),
                item.tags.join(", "),
                row_preview(ui, item, cache),
            ]);
        }
        println!("{}", table);
    } else {
        for item in items {
            println!(
                "{} | {} | {} | {} | {}",
                item.id,
                item.likes,
                item.author,
                item.tags.join(","),
                row_preview(ui, item, cache),
            );
        }
    }

    if hidden > 0 && !quiet {
        eprintln!("{} private snippet(s) hidden; {}", hidden, unlock_hint);
    }
}

fn row_preview(ui: &UiContext, item: &LibraryItem, cache: &SessionUnlockCache) -> String {
    let text = preview(
        cache.display_content(item).unwrap_or_default(),
        PREVIEW_CHARS,
    );
    if item.privacy.is_private() {
        format!("{} {}", marker(ui), text)
    } else {
        text
    }
}

/// Print one snippet in full.
///
/// Callers only pass snippets whose content can be shown.
pub fn print_item(ui: &UiContext, item: &LibraryItem, content: &str, quiet: bool) {
    if quiet {
        println!("{}", content);
        return;
    }

    let label = |name: &str| {
        if ui.color {
            name.dimmed().to_string()
        } else {
            name.to_string()
        }
    };

    println!("{} {}", label("ID:"), item.id);
    println!("{} {}", label("Author:"), item.author);
    println!("{} {}", label("Likes:"), item.likes);
    println!("{} {}", label("Created:"), item.created_at.to_rfc3339());
    if item.updated_at != item.created_at {
        println!("{} {}", label("Updated:"), item.updated_at.to_rfc3339());
    }
    if !item.tags.is_empty() {
        println!("{} {}", label("Tags:"), item.tags.join(", "));
    }
    if item.privacy.is_private() {
        println!("{} {}", label("Privacy:"), marker(ui));
    }
    println!();
    println!("{}", content);
}
