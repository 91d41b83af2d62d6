//! Check expression parsing and evaluation
//!
//! An expression is a whitespace-separated list of clauses that must all
//! hold. Each clause takes one of four shapes, tried in this order:
//!
//! - `a|!b|c` any of the membership terms holds
//! - `staff+` the active list's level is at least that of `staff`
//! - `!connected` the tag is absent from the active list
//! - `wizard` the tag is present in the active list
//!
//! # Examples
//!
//! ```
//! use tagkit::domain::{TagExpr, TagRegistry, TagSpec};
//!
//! let registry = TagRegistry::with_tags([
//!     TagSpec::new("wizard", "W").lvl(10),
//!     TagSpec::new("staff", "s").lvl(5),
//! ]);
//! let expr = TagExpr::parse("wizard|admin staff+ !banned");
//! assert!(expr.evaluate(&registry, "wizard").unwrap());
//! ```

use crate::domain::registry::TagRegistry;
use crate::error::{Result, TagkitError};
use std::collections::HashSet;
use std::fmt;

/// A single membership test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub name: String,
    pub negated: bool,
}

impl Term {
    fn parse(token: &str) -> Self {
        match token.strip_prefix('!') {
            Some(name) => Term {
                name: name.to_lowercase(),
                negated: true,
            },
            None => Term {
                name: token.to_lowercase(),
                negated: false,
            },
        }
    }

    fn matches(&self, active: &ActiveTags) -> bool {
        active.contains(&self.name) != self.negated
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// One whitespace-delimited clause of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `a|b|!c`
    AnyOf(Vec<Term>),
    /// `name+`; the name is kept as written for registry lookup
    AtLeast(String),
    /// `name` or `!name`
    Member(Term),
}

impl Clause {
    fn parse(token: &str) -> Self {
        if token.contains('|') {
            Clause::AnyOf(token.split('|').map(Term::parse).collect())
        } else if let Some(base) = token.strip_suffix('+') {
            Clause::AtLeast(base.to_string())
        } else {
            Clause::Member(Term::parse(token))
        }
    }

    fn evaluate(&self, registry: &TagRegistry, active: &ActiveTags) -> Result<bool> {
        match self {
            Clause::AnyOf(terms) => Ok(terms.iter().any(|term| term.matches(active))),
            Clause::AtLeast(base) => {
                let required = registry.exists(base).ok_or_else(|| {
                    log::warn!("threshold clause '{}+' names an unregistered tag", base);
                    TagkitError::UnknownThresholdTag(base.clone())
                })?;
                Ok(active.lvl >= required.lvl)
            }
            Clause::Member(term) => Ok(term.matches(active)),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::AnyOf(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}", term)?;
                }
                Ok(())
            }
            Clause::AtLeast(base) => write!(f, "{}+", base),
            Clause::Member(term) => write!(f, "{}", term),
        }
    }
}

/// A parsed check expression
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagExpr {
    pub clauses: Vec<Clause>,
}

impl TagExpr {
    /// Parse an expression. Parsing never fails: anything that is not an
    /// OR or threshold clause is a membership test.
    pub fn parse(expr: &str) -> Self {
        TagExpr {
            clauses: expr.split_whitespace().map(Clause::parse).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate against a whitespace-separated active tag list.
    ///
    /// Every clause is evaluated, so an unknown threshold tag is reported
    /// even when an earlier clause already failed.
    pub fn evaluate(&self, registry: &TagRegistry, active: &str) -> Result<bool> {
        let active = ActiveTags::new(registry, active);
        let mut satisfied = true;
        for clause in &self.clauses {
            satisfied &= clause.evaluate(registry, &active)?;
        }
        Ok(satisfied)
    }
}

impl fmt::Display for TagExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// Lowercased active tokens plus their resolved level
struct ActiveTags {
    names: HashSet<String>,
    lvl: u32,
}

impl ActiveTags {
    fn new(registry: &TagRegistry, list: &str) -> Self {
        ActiveTags {
            names: list.split_whitespace().map(str::to_lowercase).collect(),
            lvl: registry.lvl(list),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
