//! Parsing helpers for snippet IDs and password lists.

use library_core::{ItemFilter, ItemStore, LibraryItem};
use uuid::Uuid;

use crate::errors::CliError;

const ID_HINT: &str = "Hint: Run `library list` to find snippet IDs.";

/// Resolve a full UUID or a unique ID prefix.
pub fn resolve_item_id(store: &impl ItemStore, input: &str) -> anyhow::Result<Uuid> {
    let input = input.trim();
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }

    let prefix = input.to_ascii_lowercase();
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        return Err(CliError::invalid_input(format!("Invalid snippet ID: {}", input)).into());
    }

    let matches: Vec<Uuid> = store
        .list_items(&ItemFilter::new())?
        .into_iter()
        .map(|item| item.id)
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::not_found(format!("Snippet not found: {}", input), ID_HINT).into()),
        _ => Err(CliError::invalid_input(format!(
            "Snippet ID prefix {} is ambiguous ({} matches)",
            input,
            matches.len()
        ))
        .into()),
    }
}

/// Resolve an ID and load the snippet.
pub fn require_item(store: &impl ItemStore, input: &str) -> anyhow::Result<LibraryItem> {
    let id = resolve_item_id(store, input)?;
    store
        .get_item(&id)?
        .ok_or_else(|| CliError::not_found(format!("Snippet not found: {}", id), ID_HINT).into())
}

/// Split a comma-separated password list, dropping blanks.
pub fn split_passwords(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_core::{NewItem, SqliteStore};

    #[test]
    fn test_split_passwords() {
        assert_eq!(
            split_passwords(" a, b ,,c "),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(split_passwords(" , ").is_empty());
    }

    #[test]
    fn test_resolve_full_and_prefix() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let item = store.insert_item(&NewItem::new("hello")).unwrap();
        let full = item.id.to_string();

        assert_eq!(resolve_item_id(&store, &full).unwrap(), item.id);
        assert_eq!(resolve_item_id(&store, &full[..8]).unwrap(), item.id);
        assert_eq!(
            resolve_item_id(&store, &full[..8].to_uppercase()).unwrap(),
            item.id
        );
    }

    #[test]
    fn test_resolve_errors() {
        let store = SqliteStore::open_in_memory().unwrap();

        let invalid = resolve_item_id(&store, "not-an-id!").unwrap_err();
        assert!(matches!(
            invalid.downcast_ref::<CliError>(),
            Some(CliError::InvalidInput(_))
        ));

        let missing = resolve_item_id(&store, "abcd").unwrap_err();
        assert!(matches!(
            missing.downcast_ref::<CliError>(),
            Some(CliError::NotFound { .. })
        ));
    }

    #[test]
    fn test_require_item_loads() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let item = store.insert_item(&NewItem::new("hello")).unwrap();

        let loaded = require_item(&store, &item.id.to_string()[..13]).unwrap();
        assert_eq!(loaded.content, "hello");
    }
}
