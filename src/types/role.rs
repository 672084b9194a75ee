//! Role types for realm and client scoped permissions.

use serde::{Deserialize, Serialize};

/// A role, either realm-scoped or scoped to a single client.
///
/// Roles come back from the server in a few different shapes (role lists,
/// composite listings, role mappings). The wire payload never reliably tells
/// you which client a role belongs to, so the operations that fetch roles
/// stamp [`owner_client_id`](Role::owner_client_id) after decoding.
///
/// ## Naming Hazard
///
/// The admin API uses "client id" for two unrelated things. On this type,
/// `owner_client_id` is the **server-assigned id** of the owning
/// [`Client`](crate::Client) (a UUID-looking opaque string). It is *not* the
/// human-chosen identifier held in [`Client::client_id`](crate::Client::client_id).
///
/// ## Example
///
/// ```rust
/// use keycloak_admin::Role;
///
/// let role = Role::new("report-viewer").with_description("Can read reports");
/// assert_eq!(role.name, "report-viewer");
/// assert!(role.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Server-assigned id. `None` for roles that have not been created yet.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    /// Role name, unique within its owning scope (the realm or one client).
    pub name: String,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Whether this role implies other roles (has constituent permissions).
    #[serde(default)]
    pub composite: bool,

    /// `true` if the role is scoped to a client, `false` for realm roles.
    #[serde(default)]
    pub client_role: bool,

    /// Server-assigned id of the owning client, `None` for realm roles.
    ///
    /// This field is not part of the wire payload. The operations that fetch
    /// roles fill it in from the request context, so it always reflects where
    /// the role was actually found rather than what the server chose to echo.
    #[serde(skip)]
    pub owner_client_id: Option<String>,
}

impl Role {
    /// Creates a role value suitable for a creation request.
    ///
    /// The role has no id yet and is marked client-scoped, since roles are
    /// only ever created under a client here.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            composite: false,
            client_role: true,
            owner_client_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns a copy of this role under a different name.
    ///
    /// The rename operation sends the returned value as the update body; the
    /// original is left untouched.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Returns a copy of this role tagged with its owning client's id.
    #[must_use]
    pub(crate) fn with_owner(self, owner_client_id: &str) -> Self {
        Self {
            owner_client_id: Some(owner_client_id.to_owned()),
            ..self
        }
    }
}

/// A composite role together with the roles it implies.
///
/// Produced by the permission-resolving listing on
/// [`ClientRolesApi`](crate::api::ClientRolesApi). `permissions` stays `None`
/// until the constituents have actually been fetched; an empty `Vec` means the
/// server was asked and reported none. Callers can rely on that distinction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeRole {
    /// The composite role itself.
    #[serde(flatten)]
    pub role: Role,

    /// Constituent roles, `None` when they were not resolved.
    ///
    /// Never part of the wire payload; the server reports constituents
    /// through a separate endpoint.
    #[serde(skip)]
    pub permissions: Option<Vec<Role>>,
}

impl CompositeRole {
    /// Wraps a role without resolving its constituents.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            permissions: None,
        }
    }

    /// Attaches resolved constituent roles.
    #[must_use]
    pub fn with_permissions(mut self, permissions: Vec<Role>) -> Self {
        self.permissions = Some(permissions);
        self
    }
}
