//! Tag, author, and content validation.

use std::collections::HashSet;

use crate::error::{LibraryError, Result};

/// Author recorded when none is given.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Maximum bytes per tag.
pub const MAX_TAG_BYTES: usize = 128;

/// Maximum tags per item.
pub const MAX_TAGS_PER_ITEM: usize = 100;

/// Maximum bytes for stored content (ciphertext included).
pub const MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Normalize and validate tags.
///
/// - Trims whitespace
/// - Drops empty tags
/// - Removes duplicates, keeping first occurrence order
/// - Enforces length limits
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>> {
    let mut seen = HashSet::with_capacity(tags.len());
    let mut normalized = Vec::with_capacity(tags.len());

    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.len() > MAX_TAG_BYTES {
            return Err(LibraryError::Validation(format!(
                "Tag too long (max {} bytes)",
                MAX_TAG_BYTES
            )));
        }
        if seen.insert(trimmed.to_string()) {
            normalized.push(trimmed.to_string());
        }
    }

    if normalized.len() > MAX_TAGS_PER_ITEM {
        return Err(LibraryError::Validation(format!(
            "Too many tags (max {})",
            MAX_TAGS_PER_ITEM
        )));
    }

    Ok(normalized)
}

pub fn normalize_author(author: Option<&str>) -> String {
    match author.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNKNOWN_AUTHOR.to_string(),
    }
}

pub fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(LibraryError::Validation(
            "Content cannot be empty".to_string(),
        ));
    }
    if content.len() > MAX_CONTENT_BYTES {
        return Err(LibraryError::Validation(format!(
            "Content too large (max {} bytes)",
            MAX_CONTENT_BYTES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " poem ".to_string(),
            "".to_string(),
            "quote".to_string(),
            "poem".to_string(),
            "   ".to_string(),
        ];

        assert_eq!(
            normalize_tags(&tags).unwrap(),
            vec!["poem".to_string(), "quote".to_string()]
        );
    }

    #[test]
    fn test_tags_keep_case_and_script() {
        let tags = vec!["Poetry".to_string(), "诗".to_string()];
        assert_eq!(normalize_tags(&tags).unwrap(), tags);
    }

    #[test]
    fn test_tag_too_long() {
        let tags = vec!["x".repeat(MAX_TAG_BYTES + 1)];
        assert!(normalize_tags(&tags).is_err());
    }

    #[test]
    fn test_too_many_tags() {
        let tags: Vec<String> = (0..=MAX_TAGS_PER_ITEM).map(|i| format!("t{}", i)).collect();
        assert!(normalize_tags(&tags).is_err());
    }

    #[test]
    fn test_normalize_author() {
        assert_eq!(normalize_author(None), "unknown");
        assert_eq!(normalize_author(Some("  ")), "unknown");
        assert_eq!(normalize_author(Some(" Li Bai ")), "Li Bai");
    }

    #[test]
    fn test_validate_content() {
        assert!(validate_content("hello").is_ok());
        assert!(validate_content("  \n").is_err());
        assert!(validate_content(&"x".repeat(MAX_CONTENT_BYTES + 1)).is_err());
    }
}
