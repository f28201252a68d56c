//! Item store trait definition.
//!
//! `ItemStore` is the record-store boundary the privacy layer sits on. It
//! never sees passwords or plaintext of private items: content arrives
//! already sealed and leaves exactly as stored.

use std::path::Path;

use uuid::Uuid;

use super::types::{ItemFilter, LibraryItem, NewItem, StoreMetadata};
use crate::error::Result;

/// Storage interface for library items.
///
/// All implementations must ensure:
/// - The privacy level/key pairing is valid on every row they return
/// - Items are identified by UUID
/// - Like counts never go below zero
pub trait ItemStore: Send + Sync {
    /// Create a new store at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Storage` if the file already exists or cannot
    /// be written.
    fn create(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Open an existing store.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Storage` if the file is missing or is not a
    /// library store.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    fn metadata(&self) -> Result<StoreMetadata>;

    /// List items matching the filter, in the filter's sort order.
    fn list_items(&self, filter: &ItemFilter) -> Result<Vec<LibraryItem>>;

    /// Returns `Ok(None)` if no item has this ID.
    fn get_item(&self, id: &Uuid) -> Result<Option<LibraryItem>>;

    /// Insert a new item and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` for empty content or invalid tags.
    fn insert_item(&mut self, item: &NewItem) -> Result<LibraryItem>;

    /// Replace an item's content, author, tags, and privacy.
    ///
    /// Likes and creation time are preserved.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ItemNotFound` if no item has this ID.
    fn update_item(&mut self, id: &Uuid, item: &NewItem) -> Result<LibraryItem>;

    /// # Errors
    ///
    /// Returns `LibraryError::ItemNotFound` if no item has this ID.
    fn delete_item(&mut self, id: &Uuid) -> Result<()>;

    /// Increment the like count and return the new value.
    fn like_item(&mut self, id: &Uuid) -> Result<u32>;

    /// Decrement the like count, stopping at zero, and return the new value.
    fn unlike_item(&mut self, id: &Uuid) -> Result<u32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_definition_compiles() {
        fn _accepts_item_store<T: ItemStore>(_store: T) {}
    }
}
