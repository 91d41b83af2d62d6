//! Infrastructure layer - Registry file loading

pub mod config;

pub use config::{RegistryFile, DEFAULT_REGISTRY_FILE, REGISTRY_ENV};
