//! Configuration types for the admin client.
//!
//! This module provides configuration options for:
//! - [`TlsConfig`]: TLS/SSL settings
//!
//! The client deliberately carries no retry or resilience configuration.
//! Every operation maps to exactly one HTTP request (plus the token
//! exchange when the cached token expired); callers own retry policy.

mod tls;

pub use tls::TlsConfig;
