//! Error types for tagkit

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tagkit
#[derive(Debug, Error)]
pub enum TagkitError {
    #[error("Registry file not found: {0}")]
    RegistryNotFound(PathBuf),

    #[error("Unknown threshold tag: {0}")]
    UnknownThresholdTag(String),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Invalid tag definition: {0}")]
    InvalidTag(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TagkitError {
    /// Get the exit code for this error.
    ///
    /// Status 1 is left to `check --quiet` for a failed check.
    pub fn exit_code(&self) -> i32 {
        match self {
            TagkitError::RegistryNotFound(_) => 2,
            TagkitError::UnknownThresholdTag(_) => 3,
            TagkitError::TagNotFound(_) => 4,
            TagkitError::InvalidTag(_) => 5,
            _ => 6,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagkitError::RegistryNotFound(path) => {
                format!(
                    "Registry file not found: {}\n\n\
                    Suggestions:\n\
                    • Create a tags.toml with one [[tag]] table per tag\n\
                    • Pass the file explicitly with --registry <PATH>\n\
                    • Set TAGKIT_REGISTRY environment variable to your registry path",
                    path.display()
                )
            }
            TagkitError::UnknownThresholdTag(tag) => {
                let mut msg = format!(
                    "Unknown threshold tag: '{}'\n\n\
                    A clause ending in '+' compares levels, so its tag must be registered.\n\
                    Suggestions:\n\
                    • Run 'tagkit list' to see registered tags\n\
                    • Add a [[tag]] entry named '{}' with a lvl\n\
                    • Drop the trailing '+' for a plain membership test",
                    tag, tag
                );
                if let Some(base) = tag.strip_prefix('!') {
                    msg.push_str(&format!(
                        "\n• '!' does not negate a threshold: '!{}+' looks up a tag named '!{}'",
                        base, base
                    ));
                }
                msg
            }
            TagkitError::TagNotFound(tag) => {
                format!(
                    "No tag matches '{}'\n\n\
                    Suggestions:\n\
                    • Names are case-insensitive, codes are matched exactly\n\
                    • Run 'tagkit list' to see registered tags",
                    tag
                )
            }
            TagkitError::InvalidTag(msg) => {
                format!(
                    "Invalid tag definition: {}\n\n\
                    Names and codes must be non-empty and may not contain\n\
                    whitespace or the reserved symbols '!', '|', '+'",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagkitError
pub type Result<T> = std::result::Result<T, TagkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_not_found_suggestion() {
        let err = TagkitError::RegistryNotFound(PathBuf::from("/tmp/tags.toml"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("/tmp/tags.toml"));
        assert!(msg.contains("--registry"));
        assert!(msg.contains("TAGKIT_REGISTRY"));
    }

    #[test]
    fn test_unknown_threshold_suggestions() {
        let err = TagkitError::UnknownThresholdTag("moderator".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'moderator'"));
        assert!(msg.contains("tagkit list"));
        assert!(msg.contains("trailing '+'"));
    }

    #[test]
    fn test_negated_threshold_hint() {
        let msg = TagkitError::UnknownThresholdTag("!staff".to_string()).display_with_suggestions();
        assert!(msg.contains("'!' does not negate a threshold"));

        let msg = TagkitError::UnknownThresholdTag("staff".to_string()).display_with_suggestions();
        assert!(!msg.contains("does not negate"));
    }

    #[test]
    fn test_invalid_tag_lists_reserved_symbols() {
        let err = TagkitError::InvalidTag("name 'a|b'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'!', '|', '+'"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(TagkitError::RegistryNotFound(PathBuf::new()).exit_code(), 2);
        assert_eq!(TagkitError::UnknownThresholdTag(String::new()).exit_code(), 3);
        assert_eq!(TagkitError::TagNotFound(String::new()).exit_code(), 4);
        assert_eq!(TagkitError::InvalidTag(String::new()).exit_code(), 5);
        assert_eq!(TagkitError::Config(String::new()).exit_code(), 6);
        assert_eq!(
            TagkitError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied)).exit_code(),
            6
        );
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = TagkitError::Config("bad data".to_string());
        assert_eq!(err.display_with_suggestions(), "Configuration error: bad data");
    }
}
