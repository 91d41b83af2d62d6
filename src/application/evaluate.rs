//! Registry query use cases

use crate::domain::{DataBag, Tag, TagRegistry, TagState};
use crate::error::{Result, TagkitError};
use crate::infrastructure::RegistryFile;
use serde_json::Value;
use std::path::Path;

/// Service answering tag queries against a loaded registry
pub struct TagService {
    registry: TagRegistry,
}

impl TagService {
    /// Create a service over an existing registry
    pub fn new(registry: TagRegistry) -> Self {
        TagService { registry }
    }

    /// Load the registry file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let registry = RegistryFile::load_from_path(path)?.into_registry()?;
        Ok(TagService::new(registry))
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Resolve a token, failing when nothing matches
    pub fn exists(&self, token: &str) -> Result<&Tag> {
        self.registry
            .exists(token)
            .ok_or_else(|| TagkitError::TagNotFound(token.to_string()))
    }

    pub fn lvl(&self, tags: &str) -> u32 {
        self.registry.lvl(tags)
    }

    pub fn codes(&self, tags: &str) -> String {
        self.registry.codes(tags)
    }

    pub fn check(&self, tags: &str, expr: &str) -> Result<bool> {
        self.registry.check(tags, expr)
    }

    /// Apply a set expression; `data` is a JSON object or absent
    pub fn set(&self, tags: &str, expr: &str, data: Option<&str>) -> Result<TagState> {
        let data = match data {
            Some(json) => parse_data_bag(json)?,
            None => DataBag::new(),
        };
        Ok(self.registry.set(tags, data, expr))
    }

    /// All registered tags in registration order
    pub fn list(&self) -> Vec<&Tag> {
        self.registry.iter().collect()
    }
}

fn parse_data_bag(json: &str) -> Result<DataBag> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        other => Err(TagkitError::Config(format!(
            "--data must be a JSON object, got: {}",
            other
        ))),
    }
}
