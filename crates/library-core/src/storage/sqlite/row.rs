//! Item row type for database queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{LibraryError, Result};
use crate::privacy::Privacy;
use crate::storage::types::LibraryItem;

/// Column list matching [`ItemRow::from_row`].
pub const ITEM_COLUMNS: &str =
    "id, content, author, tags_json, likes, created_at, updated_at, privacy_level, privacy_key";

/// Raw row data from the items table, before parsing into domain types.
#[derive(Debug)]
pub struct ItemRow {
    pub id: String,
    pub content: String,
    pub author: Option<String>,
    pub tags_json: Option<String>,
    pub likes: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub privacy_level: Option<String>,
    pub privacy_key: Option<String>,
}

impl ItemRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            content: row.get(1)?,
            author: row.get(2)?,
            tags_json: row.get(3)?,
            likes: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
            privacy_level: row.get(7)?,
            privacy_key: row.get(8)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| LibraryError::Storage(format!("Invalid timestamp: {}", e)))
}

impl TryFrom<ItemRow> for LibraryItem {
    type Error = LibraryError;

    fn try_from(row: ItemRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| LibraryError::Storage(format!("Invalid item UUID: {}", e)))?;
        let created_at = parse_timestamp(&row.created_at)?;
        let updated_at = match row.updated_at {
            Some(ref value) => parse_timestamp(value)?,
            None => created_at,
        };
        let tags: Vec<String> = match row.tags_json {
            Some(ref value) => serde_json::from_str(value)
                .map_err(|e| LibraryError::Storage(format!("Invalid tags JSON: {}", e)))?,
            None => Vec::new(),
        };
        let likes = u32::try_from(row.likes.max(0))
            .map_err(|_| LibraryError::Storage("Like count out of range".to_string()))?;
        let privacy = Privacy::from_columns(row.privacy_level.as_deref(), row.privacy_key)
            .map_err(|e| LibraryError::Storage(format!("Item {}: {}", id, e)))?;
        let author = row
            .author
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| super::validation::UNKNOWN_AUTHOR.to_string());

        Ok(LibraryItem {
            id,
            content: row.content,
            author,
            tags,
            likes,
            created_at,
            updated_at,
            privacy,
        })
    }
}
