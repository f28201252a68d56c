//! Application-level utilities for the Library CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config and store files
//! - Applying unlock passwords to a session cache

mod context;
mod resolver;
mod unlock;

// Re-export public API
pub use context::AppContext;
pub use resolver::resolve_config_path;
pub use unlock::unlock_with;
