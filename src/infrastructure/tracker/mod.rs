//! Retrying REST client for the tracker issue API.

pub mod client;
pub mod retry;

pub use client::{TrackerClient, TrackerClientConfig};
pub use retry::{RetryPolicy, RetryPredicate};
