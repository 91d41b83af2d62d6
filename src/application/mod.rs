//! Application layer - Use cases and orchestration

pub mod evaluate;

pub use evaluate::TagService;
