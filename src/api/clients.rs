//! Client lookups and client-scoped role management.

use std::sync::Arc;

use crate::client::inner::{ClientInner, DecodePolicy};
use crate::types::{Client, CompositeRole, Role};
use crate::Error;

/// Facade for client operations.
///
/// Access via [`KeycloakAdmin::clients()`](crate::KeycloakAdmin::clients).
///
/// ## Example
///
/// ```rust,ignore
/// let clients = admin.clients();
///
/// // Look up by the human-chosen identifier
/// let account = clients.find_by_client_id("account").await?;
///
/// // Manage a client's roles
/// if let Some(client) = account {
///     let roles = clients.roles(&client.id).all().await?;
/// }
/// ```
#[derive(Clone)]
pub struct ClientsApi {
    inner: Arc<ClientInner>,
}

impl ClientsApi {
    /// Creates a new clients facade.
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetches a client by its server-assigned id.
    ///
    /// Returns `Ok(None)` when no client has that id. Any other failure
    /// propagates as an error carrying the server's status.
    pub async fn find(&self, id: &str) -> Result<Option<Client>, Error> {
        let path = format!("clients/{}", urlencoding::encode(id));
        self.inner.get_optional(&path).await
    }

    /// Lists every client in the realm.
    ///
    /// Order is whatever the server returned; no ordering is guaranteed
    /// here.
    pub async fn find_all(&self) -> Result<Vec<Client>, Error> {
        self.inner.get_list("clients", DecodePolicy::Strict).await
    }

    /// Finds a client by its human-chosen identifier.
    ///
    /// The admin API has no direct endpoint for this, so the full listing
    /// is scanned. Realms hold tens of clients, not thousands, which keeps
    /// the linear scan harmless. If the server ever reported duplicate
    /// identifiers the first match would win.
    pub async fn find_by_client_id(&self, client_id: &str) -> Result<Option<Client>, Error> {
        let all = self.find_all().await?;
        Ok(all.into_iter().find(|client| client.client_id == client_id))
    }

    /// Returns the role facade for one client.
    ///
    /// # Arguments
    ///
    /// * `client_id` - The client's **server-assigned** id, not the
    ///   human-chosen identifier.
    pub fn roles(&self, client_id: impl Into<String>) -> ClientRolesApi {
        ClientRolesApi::new(Arc::clone(&self.inner), client_id)
    }
}

impl std::fmt::Debug for ClientsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientsApi").finish_non_exhaustive()
    }
}

/// Facade for the roles of one client.
///
/// Access via [`ClientsApi::roles()`]. All operations are scoped to the
/// client given there; roles fetched through this facade come back with
/// [`Role::owner_client_id`] stamped to that client where the operation
/// guarantees ownership.
///
/// ## Example
///
/// ```rust,ignore
/// let roles = admin.clients().roles(&client.id);
///
/// let role_id = roles.create(&Role::new("report-viewer")).await?;
/// let found = roles.try_find("report-viewer").await?;
/// ```
#[derive(Clone)]
pub struct ClientRolesApi {
    inner: Arc<ClientInner>,
    client_id: String,
}

impl ClientRolesApi {
    /// Creates a new client-roles facade.
    pub(crate) fn new(inner: Arc<ClientInner>, client_id: impl Into<String>) -> Self {
        Self {
            inner,
            client_id: client_id.into(),
        }
    }

    /// Returns the scoped client's server-assigned id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn roles_path(&self) -> String {
        format!("clients/{}/roles", urlencoding::encode(&self.client_id))
    }

    fn role_path(&self, role_name: &str) -> String {
        format!(
            "clients/{}/roles/{}",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(role_name)
        )
    }

    /// Lists every role of this client.
    ///
    /// Each returned role has its owner stamped to this client, regardless
    /// of what the wire payload claimed.
    pub async fn all(&self) -> Result<Vec<Role>, Error> {
        let roles: Vec<Role> = self
            .inner
            .get_list(&self.roles_path(), DecodePolicy::Strict)
            .await?;
        Ok(self.stamp_owner(roles))
    }

    /// Lists this client's composite roles.
    ///
    /// Fetches the same listing as [`all()`](Self::all) and keeps only the
    /// roles flagged composite. A response that does not decode yields an
    /// empty list here instead of an error; callers treat "no composites"
    /// and "nothing usable returned" the same way.
    pub async fn composites(&self) -> Result<Vec<Role>, Error> {
        let roles: Vec<Role> = self
            .inner
            .get_list(&self.roles_path(), DecodePolicy::EmptyOnInvalid)
            .await?;
        Ok(self
            .stamp_owner(roles)
            .into_iter()
            .filter(|role| role.composite)
            .collect())
    }

    /// Lists composite roles with their constituent permissions resolved.
    ///
    /// Performs one extra request per composite role, sequentially. On a
    /// client with many composites this is a round trip per role, so bulk
    /// consumers should prefer [`composites()`](Self::composites) when the
    /// constituents are not needed.
    pub async fn composites_with_permissions(&self) -> Result<Vec<CompositeRole>, Error> {
        let composites = self.composites().await?;
        let mut resolved = Vec::with_capacity(composites.len());
        for role in composites {
            let permissions = self.composites_of(&role.name).await?;
            resolved.push(CompositeRole::new(role).with_permissions(permissions));
        }
        Ok(resolved)
    }

    /// Lists the roles a composite role implies.
    ///
    /// Constituents can be realm roles or belong to other clients, so no
    /// owner is stamped on them. Shares the lenient decode behavior of
    /// [`composites()`](Self::composites).
    pub async fn composites_of(&self, role_name: &str) -> Result<Vec<Role>, Error> {
        let path = format!("{}/composites", self.role_path(role_name));
        self.inner
            .get_list(&path, DecodePolicy::EmptyOnInvalid)
            .await
    }

    /// Fetches one role by name.
    ///
    /// Returns `Ok(None)` when this client has no role with that name.
    pub async fn try_find(&self, role_name: &str) -> Result<Option<Role>, Error> {
        let role: Option<Role> = self.inner.get_optional(&self.role_path(role_name)).await?;
        Ok(role.map(|role| role.with_owner(&self.client_id)))
    }

    /// Creates a role under this client, returning the new role's id.
    ///
    /// The id comes from the response's `Location` header; the server does
    /// not echo the created role. A duplicate name surfaces as a conflict
    /// error carrying the server's message verbatim.
    pub async fn create(&self, role: &Role) -> Result<String, Error> {
        self.inner.post_create(&self.roles_path(), role).await
    }

    /// Renames a role, returning the role value under its new name.
    ///
    /// The update is addressed by the role's current name and the body
    /// carries the new one. The passed role is left untouched; use the
    /// returned value afterwards.
    pub async fn rename(&self, role: &Role, new_name: &str) -> Result<Role, Error> {
        let renamed = role.with_name(new_name);
        self.inner
            .put_json(&self.role_path(&role.name), &renamed)
            .await?;
        Ok(renamed)
    }

    /// Adds constituent permissions to a role, making it composite.
    pub async fn add_permissions(
        &self,
        role_name: &str,
        permissions: &[Role],
    ) -> Result<(), Error> {
        let path = format!("{}/composites", self.role_path(role_name));
        self.inner.post_json(&path, permissions).await
    }

    /// Deletes a role by name.
    pub async fn delete(&self, role_name: &str) -> Result<(), Error> {
        self.inner.delete(&self.role_path(role_name)).await
    }

    fn stamp_owner(&self, roles: Vec<Role>) -> Vec<Role> {
        roles
            .into_iter()
            .map(|role| role.with_owner(&self.client_id))
            .collect()
    }
}

impl std::fmt::Debug for ClientRolesApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRolesApi")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}
