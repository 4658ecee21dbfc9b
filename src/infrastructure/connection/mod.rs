//! Connection registry and resolver.
//!
//! The registry supplies raw host/login/password records keyed by connection
//! id; the resolver turns one into a [`ConnectionProfile`] or fails naming the
//! missing field.
//!
//! [`ConnectionProfile`]: crate::domain::models::ConnectionProfile

pub mod registry;
pub mod resolver;

pub use registry::StaticConnectionRegistry;
pub use resolver::ConnectionResolver;
