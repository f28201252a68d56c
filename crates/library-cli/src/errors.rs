//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use library_core::LibraryError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, store, snippet)
    NotFound { message: String, hint: String },

    /// No password unlocked the requested snippet
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for any error surfacing from a command.
///
/// Typed CLI errors carry their own code; core errors map by kind; anything
/// else is a general failure.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    match err.downcast_ref::<LibraryError>() {
        Some(LibraryError::ItemNotFound(_)) => exit_codes::NOT_FOUND,
        Some(LibraryError::InvalidInput(_)) | Some(LibraryError::Validation(_)) => {
            exit_codes::INVALID_INPUT
        }
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_exit_codes() {
        let not_found = anyhow::Error::new(CliError::not_found("missing", "hint"));
        assert_eq!(exit_code_for(&not_found), exit_codes::NOT_FOUND);

        let auth = anyhow::Error::new(CliError::auth_failed_with_hint("no", "hint"));
        assert_eq!(exit_code_for(&auth), exit_codes::AUTH_FAILED);

        let core = anyhow::Error::new(LibraryError::ItemNotFound(Uuid::nil()));
        assert_eq!(exit_code_for(&core), exit_codes::NOT_FOUND);

        let invalid = anyhow::Error::new(LibraryError::InvalidInput("blank".to_string()));
        assert_eq!(exit_code_for(&invalid), exit_codes::INVALID_INPUT);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::not_found("Snippet not found", "Hint: run `library list`");
        assert_eq!(err.to_string(), "Snippet not found\nHint: run `library list`");
    }
}
