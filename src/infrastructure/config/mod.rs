//! Configuration management infrastructure
//!
//! Layered configuration using figment: project YAML files, local overrides
//! holding credentials, and `YATRACKER_*` environment variables, validated
//! after extraction.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
