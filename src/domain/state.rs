//! Grant/revoke directives and the state they produce

use crate::domain::tag::DataBag;

/// Case-insensitive tag comparison, using the same lowercasing as the registry
pub(crate) fn same_tag(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Tag list and data bag after applying a `set` expression
#[derive(Debug, Clone, PartialEq)]
pub struct TagState {
    /// Single-space separated tag list
    pub tags: String,
    pub data: DataBag,
}

impl TagState {
    /// Iterate over the tags in the list
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.split_whitespace()
    }

    /// Check membership case-insensitively
    pub fn has(&self, name: &str) -> bool {
        self.tag_names().any(|tag| same_tag(tag, name))
    }
}

/// One token of a `set` expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    Grant(&'a str),
    Revoke(&'a str),
}

impl<'a> Directive<'a> {
    pub fn parse(token: &'a str) -> Self {
        match token.strip_prefix('!') {
            Some(name) => Directive::Revoke(name),
            None => Directive::Grant(token),
        }
    }

    /// Split a `set` expression into directives, left to right
    pub fn parse_all(expr: &'a str) -> impl Iterator<Item = Directive<'a>> {
        expr.split_whitespace().map(Directive::parse)
    }
}

/// Insertion-ordered tag list without duplicates
#[derive(Debug, Default)]
pub(crate) struct WorkingSet {
    tags: Vec<String>,
}

impl WorkingSet {
    pub(crate) fn from_list(list: &str) -> Self {
        let mut set = WorkingSet::default();
        for tag in list.split_whitespace() {
            set.insert(tag);
        }
        set
    }

    pub(crate) fn insert(&mut self, tag: &str) {
        if !self.tags.iter().any(|t| same_tag(t, tag)) {
            self.tags.push(tag.to_string());
        }
    }

    pub(crate) fn remove(&mut self, tag: &str) {
        self.tags.retain(|t| !same_tag(t, tag));
    }

    pub(crate) fn join(&self) -> String {
        self.tags.join(" ")
    }
}
