//! Password normalization.
//!
//! Passwords are trimmed before use. Anything non-blank is accepted so that
//! items written with short passwords stay readable.

use crate::error::{LibraryError, Result};

/// Trim a password and reject blank input.
///
/// # Examples
///
/// ```
/// use library_core::crypto::normalize_password;
///
/// assert_eq!(normalize_password("  secret123 \n").unwrap(), "secret123");
/// assert!(normalize_password("   ").is_err());
/// ```
pub fn normalize_password(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert_eq!(normalize_password("secret123").unwrap(), "secret123");
        assert_eq!(normalize_password("a").unwrap(), "a");
        assert_eq!(
            normalize_password("with inner spaces").unwrap(),
            "with inner spaces"
        );
    }

    #[test]
    fn test_password_trimmed() {
        assert_eq!(normalize_password("  pw  ").unwrap(), "pw");
        assert_eq!(normalize_password("\tpw\n").unwrap(), "pw");
    }

    #[test]
    fn test_password_empty() {
        assert!(normalize_password("").is_err());
        assert!(normalize_password("   ").is_err());
        assert!(normalize_password("\n\t").is_err());
    }
}
