//! tagkit - Tag registry and permission expressions
//!
//! Tags carry a short code and a numeric level. Check expressions test a
//! space-separated list of active tags (`wizard|admin staff+ !banned`), and
//! set expressions grant or revoke tags along with their data payloads.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::{DataBag, Tag, TagRegistry, TagSpec, TagState};
pub use error::TagkitError;
