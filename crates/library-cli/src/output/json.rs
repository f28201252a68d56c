//! JSON output formatting for snippets.

use library_core::{LibraryItem, SessionUnlockCache};

/// Convert a snippet to JSON for output.
///
/// Locked private snippets carry `null` content.
pub fn item_json(item: &LibraryItem, cache: &SessionUnlockCache) -> serde_json::Value {
    let content = cache.display_content(item);
    serde_json::json!({
        "id": item.id,
        "content": content,
        "author": item.author,
        "tags": item.tags,
        "likes": item.likes,
        "created_at": item.created_at,
        "updated_at": item.updated_at,
        "privacy_level": item.privacy.level(),
        "unlocked": item.privacy.is_private() && content.is_some(),
    })
}

/// Convert multiple snippets to a JSON array for output.
pub fn items_json(items: &[&LibraryItem], cache: &SessionUnlockCache) -> Vec<serde_json::Value> {
    items.iter().map(|item| item_json(item, cache)).collect()
}
