//! Typed facades over the admin REST endpoints.
//!
//! Each facade groups the operations of one resource:
//!
//! - User management (CRUD, counting, filtered search)
//! - Per-user role mappings (realm-level and client-level)
//! - Client lookups
//! - Client-scoped role management (composites included)
//!
//! ## API Hierarchy
//!
//! ```rust,ignore
//! let admin = KeycloakAdmin::builder()
//!     .url("https://id.example.com")
//!     .realm("master")
//!     .credentials(ClientCredentialsConfig::new("admin-cli", "secret"))
//!     .build()
//!     .await?;
//!
//! // User operations
//! let users = admin.users();
//! let total = users.count().await?;
//!
//! // Role mappings of one user
//! let user_roles = users.roles("f8d2-1c77...");
//! let everything = user_roles.all().await?;
//!
//! // Client operations
//! let clients = admin.clients();
//! let account = clients.find_by_client_id("account").await?;
//!
//! // Roles of one client
//! let client_roles = clients.roles("b2f4-90aa...");
//! let composites = client_roles.composites_with_permissions().await?;
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! // Create a user and grant it a client role
//! let user_id = admin
//!     .users()
//!     .create(&NewUser::new("jdoe", "Jane", "Doe", "jdoe@example.com"))
//!     .await?;
//!
//! let client = admin
//!     .clients()
//!     .find_by_client_id("account")
//!     .await?
//!     .ok_or("client not found")?;
//!
//! let grants = admin
//!     .users()
//!     .roles(&user_id)
//!     .available_for_client(&client.id)
//!     .await?;
//!
//! admin
//!     .users()
//!     .roles(&user_id)
//!     .add_for_client(&client.id, &grants)
//!     .await?;
//! ```

mod clients;
mod users;

pub use clients::{ClientRolesApi, ClientsApi};
pub use users::{UserRolesApi, UsersApi};
