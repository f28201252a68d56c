//! Core data types for the storage layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LibraryError, Result};
use crate::privacy::{Privacy, PrivacyRecord, SealedContent};

/// Metadata for a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Format version (e.g., "1")
    pub format_version: String,

    /// When this store was created
    pub created_at: DateTime<Utc>,
}

/// A saved snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryItem {
    pub id: Uuid,

    /// Plaintext when public, ciphertext blob when private
    pub content: String,

    pub author: String,

    pub tags: Vec<String>,

    pub likes: u32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub privacy: Privacy,
}

impl PrivacyRecord for LibraryItem {
    fn record_id(&self) -> Uuid {
        self.id
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn privacy(&self) -> &Privacy {
        &self.privacy
    }
}

/// Builder for creating or replacing an item.
///
/// `content` must already be sealed: plaintext for public items, ciphertext
/// for private ones.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub content: String,

    /// Blank or missing authors are stored as `"unknown"`
    pub author: Option<String>,

    pub tags: Vec<String>,

    pub privacy: Privacy,
}

impl NewItem {
    /// A public item.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: None,
            tags: Vec::new(),
            privacy: Privacy::Public,
        }
    }

    /// An item whose body went through the privacy codec.
    pub fn sealed(sealed: SealedContent) -> Self {
        Self {
            content: sealed.content,
            author: None,
            tags: Vec::new(),
            privacy: sealed.privacy,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_privacy(mut self, privacy: Privacy) -> Self {
        self.privacy = privacy;
        self
    }
}

/// List ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first
    Newest,
    /// Most liked first, ties broken by newest
    #[default]
    Likes,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Likes => "likes",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = LibraryError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" | "created" => Ok(SortOrder::Newest),
            "likes" => Ok(SortOrder::Likes),
            other => Err(LibraryError::InvalidInput(format!(
                "Unknown sort order: {}",
                other
            ))),
        }
    }
}

/// Filter for querying items.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Items must carry every one of these tags
    pub tags: Vec<String>,

    /// Exact author match
    pub author: Option<String>,

    pub sort: SortOrder,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
