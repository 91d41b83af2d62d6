//! Registry file loading

use crate::domain::{TagRegistry, TagSpec};
use crate::error::{Result, TagkitError};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable naming the registry file
pub const REGISTRY_ENV: &str = "TAGKIT_REGISTRY";

/// Registry file looked up in the current directory
pub const DEFAULT_REGISTRY_FILE: &str = "tags.toml";

fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^\s!|+]+$").unwrap())
}

/// Tag definitions as written in a TOML registry file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryFile {
    #[serde(rename = "tag", default)]
    pub tags: Vec<TagSpec>,
}

impl RegistryFile {
    /// Parse registry definitions from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load registry definitions from a file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagkitError::RegistryNotFound(path.to_path_buf())
            } else {
                TagkitError::Io(e)
            }
        })?;

        Self::from_toml_str(&contents)
    }

    /// Resolve the registry path: TAGKIT_REGISTRY first, then ./tags.toml
    pub fn discover() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(REGISTRY_ENV) {
            return Ok(PathBuf::from(path));
        }
        Ok(std::env::current_dir()?.join(DEFAULT_REGISTRY_FILE))
    }

    /// Reject names and codes that are empty or contain reserved symbols
    pub fn validate(&self) -> Result<()> {
        for spec in &self.tags {
            if !token_regex().is_match(&spec.name) {
                return Err(TagkitError::InvalidTag(format!("name '{}'", spec.name)));
            }
            if !token_regex().is_match(&spec.code) {
                return Err(TagkitError::InvalidTag(format!(
                    "code '{}' of tag '{}'",
                    spec.code, spec.name
                )));
            }
        }
        Ok(())
    }

    /// Validate and build a registry, later entries merging over earlier ones
    pub fn into_registry(self) -> Result<TagRegistry> {
        self.validate()?;
        log::debug!("loading {} tag definitions", self.tags.len());
        Ok(TagRegistry::with_tags(self.tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[[tag]]
name = "wizard"
code = "W"
lvl = 10

[[tag]]
name = "character"
code = "C"
lock = "builder"

[tag.data]
idle = 0
thingTwo = true
"#;

    #[test]
    fn test_parse_registry_file() {
        let file = RegistryFile::from_toml_str(SAMPLE).unwrap();
        assert_eq!(file.tags.len(), 2);
        assert_eq!(file.tags[0].lvl, Some(10));
        assert_eq!(file.tags[1].lvl, None);
        assert_eq!(file.tags[1].lock.as_deref(), Some("builder"));

        let data = file.tags[1].data.as_ref().unwrap();
        assert_eq!(data.get("idle"), Some(&json!(0)));
        assert_eq!(data.get("thingTwo"), Some(&json!(true)));
    }

    #[test]
    fn test_into_registry() {
        let registry = RegistryFile::from_toml_str(SAMPLE)
            .unwrap()
            .into_registry()
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.exists("character").unwrap().lvl, 0);
        assert_eq!(registry.codes("character wizard"), "CW");
    }

    #[test]
    fn test_empty_file_is_empty_registry() {
        let registry = RegistryFile::from_toml_str("")
            .unwrap()
            .into_registry()
            .unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_code_is_parse_error() {
        let result = RegistryFile::from_toml_str("[[tag]]\nname = \"wizard\"\n");
        assert!(matches!(result, Err(TagkitError::TomlDeserialize(_))));
    }

    #[test]
    fn test_reserved_symbols_rejected() {
        for (name, code) in [("a|b", "x"), ("admin+", "x"), ("!staff", "x"), ("two words", "x")] {
            let file = RegistryFile {
                tags: vec![TagSpec::new(name, code)],
            };
            assert!(
                matches!(file.validate(), Err(TagkitError::InvalidTag(_))),
                "expected '{}' to be rejected",
                name
            );
        }

        let file = RegistryFile {
            tags: vec![TagSpec::new("staff", "")],
        };
        assert!(matches!(file.validate(), Err(TagkitError::InvalidTag(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = RegistryFile::load_from_path(&temp.path().join("tags.toml"));
        match result.unwrap_err() {
            TagkitError::RegistryNotFound(_) => {}
            other => panic!("Expected RegistryNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tags.toml");
        fs::write(&path, SAMPLE).unwrap();

        let file = RegistryFile::load_from_path(&path).unwrap();
        assert_eq!(file.tags.len(), 2);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tags.toml");
        fs::write(&path, "[[tag]\nname =").unwrap();

        match RegistryFile::load_from_path(&path).unwrap_err() {
            TagkitError::TomlDeserialize(_) => {}
            other => panic!("Expected TomlDeserialize error, got {:?}", other),
        }
    }
}
