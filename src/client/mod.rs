//! The client entry point and the facades hanging off it.
//!
//! Clients form a hierarchy:
//! - [`KeycloakAdmin`]: Top-level client, owns the transport and token state
//! - [`UsersApi`](crate::api::UsersApi) / [`ClientsApi`](crate::api::ClientsApi):
//!   per-resource operations
//! - [`UserRolesApi`](crate::api::UserRolesApi) / [`ClientRolesApi`](crate::api::ClientRolesApi):
//!   role operations scoped to one user or client
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keycloak_admin::prelude::*;
//!
//! let admin = KeycloakAdmin::builder()
//!     .url("https://id.example.com")
//!     .realm("customers")
//!     .credentials(ClientCredentialsConfig::new("admin-cli", "secret"))
//!     .build()
//!     .await?;
//!
//! let account = admin.clients().find_by_client_id("account").await?;
//! let users = admin.users().find_all(None).await?;
//! ```

mod builder;
pub(crate) mod inner;

pub use builder::KeycloakAdminBuilder;

use std::sync::Arc;

use crate::api::{ClientsApi, UsersApi};

/// The admin API client.
///
/// Everything starts here: build one with [`KeycloakAdmin::builder()`],
/// then reach the per-resource operations through [`users()`](Self::users)
/// and [`clients()`](Self::clients).
///
/// ## Sharing across tasks
///
/// `KeycloakAdmin` is `Clone` and thread-safe. Clones share the underlying
/// HTTP connection pool and cached token, so cloning is cheap and the usual
/// way to hand the client to other tasks.
///
/// ## Example
///
/// ```rust,ignore
/// use keycloak_admin::KeycloakAdmin;
///
/// let admin = KeycloakAdmin::builder()
///     .url("https://id.example.com")
///     .realm("master")
///     .credentials(credentials)
///     .build()
///     .await?;
///
/// let admin2 = admin.clone();
/// tokio::spawn(async move {
///     let count = admin2.users().count().await;
/// });
/// ```
#[derive(Clone)]
pub struct KeycloakAdmin {
    inner: Arc<inner::ClientInner>,
}

impl KeycloakAdmin {
    /// Starts a client builder.
    ///
    /// The builder tracks the required settings in its type, so a missing
    /// URL or missing credentials fails compilation rather than surfacing
    /// at runtime.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use keycloak_admin::KeycloakAdmin;
    ///
    /// let admin = KeycloakAdmin::builder()
    ///     .url("https://id.example.com")
    ///     .realm("master")
    ///     .credentials(credentials)
    ///     .build()
    ///     .await?;
    /// ```
    pub fn builder() -> KeycloakAdminBuilder<builder::NoUrl, builder::NoCredentials> {
        KeycloakAdminBuilder::new()
    }

    /// Returns the user operations facade.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let user = admin.users().find("a1b2c3").await?;
    /// ```
    pub fn users(&self) -> UsersApi {
        UsersApi::new(Arc::clone(&self.inner))
    }

    /// Returns the client operations facade.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let account = admin.clients().find_by_client_id("account").await?;
    /// ```
    pub fn clients(&self) -> ClientsApi {
        ClientsApi::new(Arc::clone(&self.inner))
    }

    /// Wraps an assembled inner client.
    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for KeycloakAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakAdmin").finish_non_exhaustive()
    }
}
