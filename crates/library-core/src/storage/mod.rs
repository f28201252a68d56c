//! Storage abstraction for Library.
//!
//! This module defines the `ItemStore` trait and the item types that cross
//! it, plus the SQLite backend.
//!
//! ## Security
//!
//! The store holds whatever the privacy codec produced. It never derives
//! keys or sees private plaintext; rows that break the privacy level/key
//! pairing are rejected when loaded.

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::SqliteStore;
pub use traits::ItemStore;
pub use types::{ItemFilter, LibraryItem, NewItem, SortOrder, StoreMetadata};
