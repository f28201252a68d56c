//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, store, snippet).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (no password unlocked the snippet).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variables read by the CLI.
pub mod env {
    /// Config file override.
    pub const CONFIG: &str = "LIBRARY_CONFIG";

    /// Password for new private snippets.
    pub const PASSWORD: &str = "LIBRARY_PASSWORD";

    /// Comma-separated passwords to unlock with.
    pub const UNLOCK: &str = "LIBRARY_UNLOCK";

    /// `tracing` filter directives.
    pub const LOG: &str = "LIBRARY_LOG";
}

/// Message shown whenever a password unlocks nothing.
pub const UNLOCK_REJECTED: &str = "Wrong password or no matching content";

/// Characters of content shown per row in list output.
pub const PREVIEW_CHARS: usize = 60;
