//! SQLite storage backend.
//!
//! Items live in a single `general_library_items` table. Private items keep
//! ciphertext in `content`, so the database file itself is stored unencrypted.

mod row;
mod validation;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::error::{LibraryError, Result};
use crate::privacy::Privacy;
use crate::storage::traits::ItemStore;
use crate::storage::types::{ItemFilter, LibraryItem, NewItem, SortOrder, StoreMetadata};

use row::{ItemRow, ITEM_COLUMNS};
use validation::{normalize_author, normalize_tags, validate_content, UNKNOWN_AUTHOR};

pub use validation::{MAX_CONTENT_BYTES, MAX_TAGS_PER_ITEM, MAX_TAG_BYTES};

/// Current on-disk format version.
pub const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE general_library_items (
        id TEXT PRIMARY KEY,
        content TEXT NOT NULL,
        author TEXT,
        tags_json TEXT,
        likes INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        privacy_level TEXT,
        privacy_key TEXT
    );

    CREATE INDEX general_library_items_created
    ON general_library_items (created_at);
"#;

/// Columns ready to bind, after validation.
struct PreparedItem {
    content: String,
    author: String,
    tags_json: Option<String>,
    privacy_level: &'static str,
    privacy_key: Option<String>,
}

impl PreparedItem {
    fn from_new(item: &NewItem) -> Result<Self> {
        validate_content(&item.content)?;
        if let Privacy::Private { fingerprint } = &item.privacy {
            if fingerprint.is_empty() {
                return Err(LibraryError::Validation(
                    "Private item requires a privacy key".to_string(),
                ));
            }
        }

        let tags = normalize_tags(&item.tags)?;
        let tags_json = if tags.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&tags).map_err(|e| {
                LibraryError::Storage(format!("Failed to serialize tags: {}", e))
            })?)
        };

        Ok(Self {
            content: item.content.clone(),
            author: normalize_author(item.author.as_deref()),
            tags_json,
            privacy_level: item.privacy.level().as_str(),
            privacy_key: item.privacy.key().map(str::to_string),
        })
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQLite-backed item store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// A throwaway store that lives only as long as the value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| LibraryError::Storage("SQLite connection poisoned".to_string()))
    }

    fn initialize(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA)?;
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["format_version", FORMAT_VERSION],
        )?;
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["created_at", &timestamp()],
        )?;
        Ok(())
    }

    fn fetch(conn: &Connection, id: &Uuid) -> Result<Option<LibraryItem>> {
        let query = format!(
            "SELECT {} FROM general_library_items WHERE id = ?",
            ITEM_COLUMNS
        );
        let row = conn
            .query_row(&query, [id.to_string()], ItemRow::from_row)
            .optional()?;
        row.map(LibraryItem::try_from).transpose()
    }

    fn fetch_existing(conn: &Connection, id: &Uuid) -> Result<LibraryItem> {
        Self::fetch(conn, id)?.ok_or(LibraryError::ItemNotFound(*id))
    }

    fn adjust_likes(&self, id: &Uuid, sql: &str) -> Result<u32> {
        let conn = self.lock_conn()?;
        let likes: Option<i64> = conn
            .query_row(sql, [id.to_string()], |row| row.get(0))
            .optional()?;
        let likes = likes.ok_or(LibraryError::ItemNotFound(*id))?;
        u32::try_from(likes)
            .map_err(|_| LibraryError::Storage("Like count out of range".to_string()))
    }
}

/// Create an empty file readable and writable only by its owner.
///
/// SQLite gives its journal files the same mode as the database.
fn create_owner_only_file(path: &Path) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)?;
    Ok(())
}

impl ItemStore for SqliteStore {
    fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(LibraryError::Storage(format!(
                "Store already exists: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        create_owner_only_file(path)?;
        let conn = Connection::open(path)?;
        Self::initialize(&conn)?;
        debug!(path = %path.display(), "created store");

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LibraryError::Storage(format!(
                "Store not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|_| {
                LibraryError::Storage(format!("Not a library store: {}", path.display()))
            })?;
        match version.as_deref() {
            Some(FORMAT_VERSION) => {}
            Some(other) => {
                return Err(LibraryError::Storage(format!(
                    "Unsupported store format version: {}",
                    other
                )))
            }
            None => {
                return Err(LibraryError::Storage(
                    "Store is missing its format version".to_string(),
                ))
            }
        }

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;

        let format_version: String = conn.query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )?;
        let created_at_str: String = conn.query_row(
            "SELECT value FROM meta WHERE key = 'created_at'",
            [],
            |row| row.get(0),
        )?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| LibraryError::Storage(format!("Invalid created_at timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(StoreMetadata {
            format_version,
            created_at,
        })
    }

    fn list_items(&self, filter: &ItemFilter) -> Result<Vec<LibraryItem>> {
        let conn = self.lock_conn()?;

        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        for tag in normalize_tags(&filter.tags)? {
            conditions.push(
                "i.tags_json IS NOT NULL AND EXISTS (SELECT 1 FROM json_each(i.tags_json) WHERE value = ?)"
                    .to_string(),
            );
            params.push(Box::new(tag));
        }

        if let Some(ref author) = filter.author {
            conditions.push("COALESCE(NULLIF(TRIM(i.author), ''), ?) = ?".to_string());
            params.push(Box::new(UNKNOWN_AUTHOR));
            params.push(Box::new(normalize_author(Some(author))));
        }

        let mut query = format!("SELECT {} FROM general_library_items i", ITEM_COLUMNS);
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(match filter.sort {
            SortOrder::Newest => " ORDER BY i.created_at DESC, i.id DESC",
            SortOrder::Likes => " ORDER BY i.likes DESC, i.created_at DESC, i.id DESC",
        });

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter()),
            ItemRow::from_row,
        )?;

        let mut items = Vec::new();
        for row in rows {
            items.push(LibraryItem::try_from(row?)?);
        }
        Ok(items)
    }

    fn get_item(&self, id: &Uuid) -> Result<Option<LibraryItem>> {
        let conn = self.lock_conn()?;
        Self::fetch(&conn, id)
    }

    fn insert_item(&mut self, item: &NewItem) -> Result<LibraryItem> {
        let prepared = PreparedItem::from_new(item)?;
        let id = Uuid::now_v7();
        let now = timestamp();

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO general_library_items
                (id, content, author, tags_json, likes, created_at, updated_at, privacy_level, privacy_key)
            VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5, ?6, ?7)
            "#,
            params![
                id.to_string(),
                prepared.content,
                prepared.author,
                prepared.tags_json,
                now,
                prepared.privacy_level,
                prepared.privacy_key,
            ],
        )?;
        debug!(item = %id, privacy = prepared.privacy_level, "inserted item");

        Self::fetch_existing(&conn, &id)
    }

    fn update_item(&mut self, id: &Uuid, item: &NewItem) -> Result<LibraryItem> {
        let prepared = PreparedItem::from_new(item)?;

        let conn = self.lock_conn()?;
        let changed = conn.execute(
            r#"
            UPDATE general_library_items
            SET content = ?1, author = ?2, tags_json = ?3, privacy_level = ?4,
                privacy_key = ?5, updated_at = ?6
            WHERE id = ?7
            "#,
            params![
                prepared.content,
                prepared.author,
                prepared.tags_json,
                prepared.privacy_level,
                prepared.privacy_key,
                timestamp(),
                id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(LibraryError::ItemNotFound(*id));
        }
        debug!(item = %id, privacy = prepared.privacy_level, "updated item");

        Self::fetch_existing(&conn, id)
    }

    fn delete_item(&mut self, id: &Uuid) -> Result<()> {
        let conn = self.lock_conn()?;
        let changed = conn.execute(
            "DELETE FROM general_library_items WHERE id = ?",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(LibraryError::ItemNotFound(*id));
        }
        debug!(item = %id, "deleted item");
        Ok(())
    }

    fn like_item(&mut self, id: &Uuid) -> Result<u32> {
        self.adjust_likes(
            id,
            "UPDATE general_library_items SET likes = likes + 1 WHERE id = ? RETURNING likes",
        )
    }

    fn unlike_item(&mut self, id: &Uuid) -> Result<u32> {
        self.adjust_likes(
            id,
            "UPDATE general_library_items SET likes = MAX(likes - 1, 0) WHERE id = ? RETURNING likes",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn private_item(content: &str) -> NewItem {
        NewItem::new(content).with_privacy(Privacy::Private {
            fingerprint: "a".repeat(64),
        })
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let item = store
            .insert_item(
                &NewItem::new("hello")
                    .with_author("  Li Bai ")
                    .with_tags(vec!["poem".to_string(), " poem ".to_string()]),
            )
            .unwrap();

        assert_eq!(item.author, "Li Bai");
        assert_eq!(item.tags, vec!["poem".to_string()]);
        assert_eq!(item.likes, 0);
        assert_eq!(item.privacy, Privacy::Public);

        let fetched = store.get_item(&item.id).unwrap().unwrap();
        assert_eq!(fetched, item);
        assert!(store.get_item(&Uuid::now_v7()).unwrap().is_none());
    }

    #[test]
    fn test_insert_private_keeps_fingerprint() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let item = store.insert_item(&private_item("blob")).unwrap();

        assert_eq!(item.privacy.key(), Some("a".repeat(64).as_str()));
        assert_eq!(item.content, "blob");
    }

    #[test]
    fn test_insert_rejects_empty_content() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let result = store.insert_item(&NewItem::new("   "));
        assert!(matches!(result, Err(LibraryError::Validation(_))));
    }

    #[test]
    fn test_insert_rejects_private_without_key() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let item = NewItem::new("blob").with_privacy(Privacy::Private {
            fingerprint: String::new(),
        });
        assert!(store.insert_item(&item).is_err());
    }

    #[test]
    fn test_update_preserves_likes_and_created() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let item = store.insert_item(&NewItem::new("v1")).unwrap();
        store.like_item(&item.id).unwrap();

        let updated = store
            .update_item(&item.id, &private_item("v2-cipher"))
            .unwrap();

        assert_eq!(updated.content, "v2-cipher");
        assert!(updated.privacy.is_private());
        assert_eq!(updated.likes, 1);
        assert_eq!(updated.created_at, item.created_at);
        assert!(updated.updated_at >= item.updated_at);
    }

    #[test]
    fn test_update_missing_item() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = Uuid::now_v7();
        let result = store.update_item(&id, &NewItem::new("x"));
        assert!(matches!(result, Err(LibraryError::ItemNotFound(missing)) if missing == id));
    }

    #[test]
    fn test_delete() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let item = store.insert_item(&NewItem::new("bye")).unwrap();

        store.delete_item(&item.id).unwrap();
        assert!(store.get_item(&item.id).unwrap().is_none());
        assert!(matches!(
            store.delete_item(&item.id),
            Err(LibraryError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_like_and_unlike_floor_at_zero() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let item = store.insert_item(&NewItem::new("likeable")).unwrap();

        assert_eq!(store.like_item(&item.id).unwrap(), 1);
        assert_eq!(store.like_item(&item.id).unwrap(), 2);
        assert_eq!(store.unlike_item(&item.id).unwrap(), 1);
        assert_eq!(store.unlike_item(&item.id).unwrap(), 0);
        assert_eq!(store.unlike_item(&item.id).unwrap(), 0);
        assert!(matches!(
            store.like_item(&Uuid::now_v7()),
            Err(LibraryError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_list_filters_by_all_tags_and_author() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_item(
                &NewItem::new("a")
                    .with_author("me")
                    .with_tags(vec!["x".to_string(), "y".to_string()]),
            )
            .unwrap();
        store
            .insert_item(&NewItem::new("b").with_tags(vec!["x".to_string()]))
            .unwrap();
        store.insert_item(&NewItem::new("c")).unwrap();

        let both = store
            .list_items(&ItemFilter::new().tag("x").tag("y"))
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].content, "a");

        let x = store.list_items(&ItemFilter::new().tag(" x ")).unwrap();
        assert_eq!(x.len(), 2);

        let mine = store.list_items(&ItemFilter::new().author("me")).unwrap();
        assert_eq!(mine.len(), 1);

        let unknown = store
            .list_items(&ItemFilter::new().author("unknown"))
            .unwrap();
        assert_eq!(unknown.len(), 2);
    }

    #[test]
    fn test_list_sort_and_limit() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let first = store.insert_item(&NewItem::new("first")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = store.insert_item(&NewItem::new("second")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let third = store.insert_item(&NewItem::new("third")).unwrap();
        store.like_item(&first.id).unwrap();

        let by_likes = store.list_items(&ItemFilter::new()).unwrap();
        let ids: Vec<Uuid> = by_likes.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![first.id, third.id, second.id]);

        let newest = store
            .list_items(&ItemFilter::new().sort(SortOrder::Newest).limit(2))
            .unwrap();
        let ids: Vec<Uuid> = newest.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![third.id, second.id]);
    }

    #[test]
    fn test_metadata() {
        let store = SqliteStore::open_in_memory().unwrap();
        let meta = store.metadata().unwrap();
        assert_eq!(meta.format_version, FORMAT_VERSION);
        assert!(store.path().is_none());
    }
}
