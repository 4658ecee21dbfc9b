//! Infrastructure layer module
//!
//! Adapters behind the domain ports:
//! - Tracker REST client with retry policy
//! - Connection registry and resolver
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod connection;
pub mod logging;
pub mod tracker;
