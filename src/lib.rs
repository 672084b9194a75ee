//! # Keycloak Admin Client
//!
//! Typed Rust client for the Keycloak Admin REST API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keycloak_admin::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), keycloak_admin::Error> {
//!     // Create the admin client
//!     let admin = KeycloakAdmin::builder()
//!         .url("https://id.example.com")
//!         .realm("master")
//!         .credentials(ClientCredentialsConfig::new("admin-cli", "1337aabbcc"))
//!         .build()
//!         .await?;
//!
//!     // Create a user; the id comes from the Location header
//!     let user_id = admin
//!         .users()
//!         .create(&NewUser::new("jdoe", "Jane", "Doe", "jdoe@example.com"))
//!         .await?;
//!
//!     // List everything mapped to the user, realm roles first
//!     let roles = admin.users().roles(&user_id).all().await?;
//!     println!("{} roles", roles.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Client Hierarchy**: `KeycloakAdmin` → `UsersApi`/`ClientsApi` →
//!   `UserRolesApi`/`ClientRolesApi`
//! - **Absence ≠ Error**: `find()` and `try_find()` return `Ok(None)` for a
//!   missing resource, not `Err`
//! - **Two client identifiers**: `Client::id` is server-assigned,
//!   `Client::client_id` is the human-chosen name; role facades take the
//!   server-assigned one
//! - **Created ids**: creation endpoints return no body; the new id is read
//!   from the `Location` header
//!
//! ## Features
//!
//! - `rest` (default): HTTP transport via reqwest
//! - `rustls` (default): rustls for TLS
//! - `native-tls`: platform TLS instead (OpenSSL on Linux, Secure Transport
//!   on macOS)
//! - `tracing`: debug-level events for requests and token exchanges
//! - `integration-tests`: gates the tests that need a live server

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod transport;
pub mod types;

mod user_agent;

// The types most callers touch, lifted to the crate root.
pub use api::{ClientRolesApi, ClientsApi, UserRolesApi, UsersApi};
pub use auth::{BearerCredentialsConfig, ClientCredentialsConfig, Credentials};
pub use client::{KeycloakAdmin, KeycloakAdminBuilder};
pub use config::TlsConfig;
pub use error::{Error, ErrorKind};
pub use types::{
    Client, ClientRoleMappings, CompositeRole, NewUser, ProtocolMapper, Role, RoleMappings, User,
    UserQuery,
};
