//! How the client authenticates against the server.
//!
//! Two ways in, both expressed as [`Credentials`]:
//!
//! - [`ClientCredentialsConfig`]: OAuth 2.0 client credentials (id + secret)
//! - [`BearerCredentialsConfig`]: a pre-issued bearer token
//!
//! ## Client credentials, the production path
//!
//! The client exchanges the id and secret for an access token at
//! `realms/{realm}/protocol/openid-connect/token` and refreshes it before
//! expiry:
//!
//! ```rust,ignore
//! use keycloak_admin::{ClientCredentialsConfig, KeycloakAdmin};
//!
//! let admin = KeycloakAdmin::builder()
//!     .url("https://id.example.com")
//!     .realm("master")
//!     .credentials(ClientCredentialsConfig {
//!         client_id: "admin-cli".into(),
//!         client_secret: "1337aabbcc".into(),
//!     })
//!     .build()
//!     .await?;
//! ```
//!
//! ## Bearer token, for short-lived sessions
//!
//! A token obtained out of band (e.g. from `kcadm.sh config credentials`)
//! can be passed through directly; it is never refreshed:
//!
//! ```rust,ignore
//! use keycloak_admin::{BearerCredentialsConfig, KeycloakAdmin};
//!
//! let admin = KeycloakAdmin::builder()
//!     .url("https://id.example.com")
//!     .realm("master")
//!     .credentials(BearerCredentialsConfig::new("your-admin-token"))
//!     .build()
//!     .await?;
//! ```

mod credentials;

pub use credentials::{BearerCredentialsConfig, ClientCredentialsConfig, Credentials};
