//! In-memory tag registry
//!
//! Holds every known tag keyed by lowercased name and answers the four
//! questions callers ask of a tag list: which tag a token names, the highest
//! level in a list, the compact code string, and whether a check expression
//! holds. `set` derives a new list and data bag from grant/revoke directives.
//!
//! # Examples
//!
//! ```
//! use tagkit::domain::{DataBag, TagRegistry, TagSpec};
//!
//! let mut registry = TagRegistry::new();
//! registry.add(TagSpec::new("wizard", "W").lvl(10));
//! registry.add(TagSpec::new("staff", "s").lvl(5));
//!
//! assert_eq!(registry.lvl("staff wizard"), 10);
//! assert_eq!(registry.codes("wizard staff"), "Ws");
//! assert!(registry.check("wizard", "staff+ !banned").unwrap());
//!
//! let state = registry.set("", DataBag::new(), "staff");
//! assert_eq!(state.tags, "staff");
//! ```

use crate::domain::expr::TagExpr;
use crate::domain::state::{same_tag, Directive, TagState, WorkingSet};
use crate::domain::tag::{DataBag, Tag, TagSpec};
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;

/// Registry of tag definitions
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: Vec<Tag>,
    by_name: HashMap<String, usize>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the given tags
    pub fn with_tags(tags: impl IntoIterator<Item = TagSpec>) -> Self {
        let mut registry = Self::new();
        registry.extend(tags);
        registry
    }

    /// Register a tag, merging over any existing tag with the same name
    pub fn add(&mut self, spec: TagSpec) {
        let key = spec.name.to_lowercase();
        match self.by_name.get(&key) {
            Some(&index) => {
                let merged = self.tags[index].merge(spec);
                log::debug!(
                    "updated tag '{}' (code '{}', lvl {})",
                    merged.name,
                    merged.code,
                    merged.lvl
                );
                self.tags[index] = merged;
            }
            None => {
                let tag = Tag::from_spec(spec);
                log::debug!(
                    "registered tag '{}' (code '{}', lvl {})",
                    tag.name,
                    tag.code,
                    tag.lvl
                );
                self.by_name.insert(key, self.tags.len());
                self.tags.push(tag);
            }
        }
    }

    /// Register several tags in order
    pub fn extend(&mut self, specs: impl IntoIterator<Item = TagSpec>) {
        for spec in specs {
            self.add(spec);
        }
    }

    /// Look up a tag by case-insensitive name or exact code.
    ///
    /// A name match wins over a code match.
    pub fn exists(&self, token: &str) -> Option<&Tag> {
        if token.is_empty() {
            return None;
        }
        self.by_name
            .get(&token.to_lowercase())
            .map(|&index| &self.tags[index])
            .or_else(|| self.tags.iter().find(|tag| tag.code == token))
    }

    /// Highest level among the resolvable tokens of a list
    pub fn lvl(&self, list: &str) -> u32 {
        list.split_whitespace()
            .filter_map(|token| self.exists(token))
            .map(|tag| tag.lvl)
            .max()
            .unwrap_or(0)
    }

    /// Concatenated codes of the resolvable tokens of a list
    pub fn codes(&self, list: &str) -> String {
        list.split_whitespace()
            .filter_map(|token| self.exists(token))
            .map(|tag| tag.code.as_str())
            .collect()
    }

    /// Test an active tag list against a check expression.
    ///
    /// Fails only when a threshold clause names an unregistered tag.
    pub fn check(&self, active: &str, expr: &str) -> Result<bool> {
        TagExpr::parse(expr).evaluate(self, active)
    }

    /// Apply grant and revoke directives to a tag list and its data bag.
    ///
    /// Unknown grants and revokes are ignored.
    pub fn set(&self, tags: &str, mut data: DataBag, expr: &str) -> TagState {
        let mut working = WorkingSet::from_list(tags);

        for directive in Directive::parse_all(expr) {
            match directive {
                Directive::Revoke(name) => {
                    let tag = self.exists(name);
                    working.remove(name);
                    data.retain(|key, _| !same_tag(key, name));
                    if let Some(tag) = tag {
                        working.remove(&tag.name);
                        data.retain(|key, _| !same_tag(key, &tag.name));
                        log::debug!("revoked tag '{}'", tag.name);
                        if let Some(hook) = &tag.on_remove {
                            hook.call(&mut data);
                        }
                    }
                }
                Directive::Grant(token) => {
                    let Some(tag) = self.exists(token) else {
                        log::debug!("ignoring unknown tag '{}'", token);
                        continue;
                    };
                    working.insert(&tag.name);
                    if let Some(payload) = &tag.data {
                        if !data.contains_key(&tag.name) {
                            data.insert(tag.name.clone(), Value::Object(payload.clone()));
                        }
                    }
                    log::debug!("granted tag '{}'", tag.name);
                    if let Some(hook) = &tag.on_add {
                        hook.call(&mut data);
                    }
                }
            }
        }

        TagState {
            tags: working.join(),
            data,
        }
    }

    /// Registered tags in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
