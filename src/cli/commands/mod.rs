//! CLI command implementations.

pub mod issue;
