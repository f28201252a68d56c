//! Helper functions for the Library CLI.
//!
//! This module provides:
//! - **input**: Password prompts, confirmations, snippet body reading
//! - **parsing**: Snippet ID resolution and password list parsing

mod input;
mod parsing;

// Re-export all public items
pub use input::{confirm, new_password, read_item_body, unlock_passwords};
pub use parsing::{require_item, resolve_item_id};
