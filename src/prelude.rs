//! One import for the names most programs need.
//!
//! ```rust
//! use keycloak_admin::prelude::*;
//! ```
//!
//! Pulls in the client, its facades, the credential and TLS configs, the
//! error types, and the entity types.

pub use crate::{
    api::{ClientRolesApi, ClientsApi, UserRolesApi, UsersApi},
    auth::{BearerCredentialsConfig, ClientCredentialsConfig, Credentials},
    client::{KeycloakAdmin, KeycloakAdminBuilder},
    config::TlsConfig,
    error::{Error, ErrorKind, Result},
    types::{
        Client, ClientRoleMappings, CompositeRole, NewUser, ProtocolMapper, Role, RoleMappings,
        User, UserQuery,
    },
};
