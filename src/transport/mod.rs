//! How requests reach the server.
//!
//! Two implementations of [`AdminTransport`] live here: the reqwest-backed
//! `RestTransport` for production and an in-memory mock for tests.
//!
//! Transports carry no protocol interpretation. They return a response for
//! every HTTP status and only fail on network faults; deciding what a 404
//! or 409 means happens in the [`KeycloakAdmin`](crate::KeycloakAdmin) API
//! above.
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable the REST transport

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

// Only test builds reach the mock
#[allow(dead_code)]
pub(crate) mod mock;

pub use traits::{AdminRequest, AdminResponse, AdminTransport, Method};

#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};
