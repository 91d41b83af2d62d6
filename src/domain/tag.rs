//! Tag definitions and the partial records used to register them

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Auxiliary state carried alongside a tag list, keyed by tag name.
pub type DataBag = Map<String, Value>;

type HookFn = dyn Fn(&mut DataBag) + Send + Sync;

/// Side effect run when a tag is granted or revoked.
///
/// Hooks run synchronously inside `set`, so any change they make to the
/// data bag is visible in the returned state.
#[derive(Clone)]
pub struct TagHook(Arc<HookFn>);

impl TagHook {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&mut DataBag) + Send + Sync + 'static,
    {
        TagHook(Arc::new(hook))
    }

    pub fn call(&self, data: &mut DataBag) {
        (self.0)(data)
    }
}

impl fmt::Debug for TagHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TagHook(..)")
    }
}

/// A registered tag
#[derive(Debug, Clone)]
pub struct Tag {
    /// Lowercased unique name
    pub name: String,
    /// Short code used by `codes`
    pub code: String,
    pub lvl: u32,
    /// Payload copied into a data bag when the tag is granted
    pub data: Option<DataBag>,
    /// Carried for callers; no operation reads it
    pub lock: Option<String>,
    pub on_add: Option<TagHook>,
    pub on_remove: Option<TagHook>,
}

impl Tag {
    /// Build a fresh tag from a spec, defaulting `lvl` to 0
    pub fn from_spec(spec: TagSpec) -> Self {
        Tag {
            name: spec.name.to_lowercase(),
            code: spec.code,
            lvl: spec.lvl.unwrap_or(0),
            data: spec.data,
            lock: spec.lock,
            on_add: spec.on_add,
            on_remove: spec.on_remove,
        }
    }

    /// Merge a spec over this tag, returning the updated record.
    ///
    /// Name and code always come from the spec and `lvl` falls back to 0
    /// when the spec omits it. The optional fields keep their current value
    /// unless the spec supplies one.
    pub fn merge(&self, spec: TagSpec) -> Self {
        Tag {
            name: spec.name.to_lowercase(),
            code: spec.code,
            lvl: spec.lvl.unwrap_or(0),
            data: spec.data.or_else(|| self.data.clone()),
            lock: spec.lock.or_else(|| self.lock.clone()),
            on_add: spec.on_add.or_else(|| self.on_add.clone()),
            on_remove: spec.on_remove.or_else(|| self.on_remove.clone()),
        }
    }
}

/// A partial tag record as supplied to `TagRegistry::add`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagSpec {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub lvl: Option<u32>,
    #[serde(default)]
    pub data: Option<DataBag>,
    #[serde(default)]
    pub lock: Option<String>,
    #[serde(skip)]
    pub on_add: Option<TagHook>,
    #[serde(skip)]
    pub on_remove: Option<TagHook>,
}

impl TagSpec {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        TagSpec {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn lvl(mut self, lvl: u32) -> Self {
        self.lvl = Some(lvl);
        self
    }

    pub fn data(mut self, data: DataBag) -> Self {
        self.data = Some(data);
        self
    }

    pub fn lock(mut self, lock: impl Into<String>) -> Self {
        self.lock = Some(lock.into());
        self
    }

    pub fn on_add<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut DataBag) + Send + Sync + 'static,
    {
        self.on_add = Some(TagHook::new(hook));
        self
    }

    pub fn on_remove<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut DataBag) + Send + Sync + 'static,
    {
        self.on_remove = Some(TagHook::new(hook));
        self
    }
}
