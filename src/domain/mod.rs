//! Domain layer - Tag registry, expressions and state transitions

pub mod expr;
pub mod registry;
pub mod state;
pub mod tag;

pub use expr::{Clause, TagExpr, Term};
pub use registry::TagRegistry;
pub use state::{Directive, TagState};
pub use tag::{DataBag, Tag, TagHook, TagSpec};
