//! User management and per-user role mappings.

use std::sync::Arc;

use crate::client::inner::{ClientInner, DecodePolicy};
use crate::types::{NewUser, Role, RoleMappings, User, UserQuery};
use crate::Error;

/// Facade for user operations.
///
/// Access via [`KeycloakAdmin::users()`](crate::KeycloakAdmin::users).
///
/// ## Example
///
/// ```rust,ignore
/// let users = admin.users();
///
/// let id = users
///     .create(&NewUser::new("jdoe", "Jane", "Doe", "jdoe@example.com"))
///     .await?;
///
/// let total = users.count().await?;
/// ```
#[derive(Clone)]
pub struct UsersApi {
    inner: Arc<ClientInner>,
}

impl UsersApi {
    /// Creates a new users facade.
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetches a user by its server-assigned id.
    ///
    /// Returns `Ok(None)` when no user has that id.
    pub async fn find(&self, id: &str) -> Result<Option<User>, Error> {
        let path = format!("users/{}", urlencoding::encode(id));
        self.inner.get_optional(&path).await
    }

    /// Lists users, optionally filtered.
    ///
    /// With no query (or an empty one) the server applies its own default
    /// page size, so on large realms this does not return everyone. Use
    /// [`UserQuery::first`] and [`UserQuery::max`] to page explicitly.
    pub async fn find_all(&self, query: Option<&UserQuery>) -> Result<Vec<User>, Error> {
        let path = match query {
            Some(query) if !query.is_empty() => format!("users?{}", query.to_query_string()),
            _ => "users".to_string(),
        };
        self.inner.get_list(&path, DecodePolicy::Strict).await
    }

    /// Returns the total number of users in the realm.
    ///
    /// The server answers this endpoint with a bare number, not JSON.
    pub async fn count(&self) -> Result<u64, Error> {
        let text = self.inner.get_text("users/count").await?;
        text.trim().parse().map_err(|_| {
            Error::invalid_response(format!("user count is not a number: {:?}", text))
        })
    }

    /// Creates a user, returning the new user's server-assigned id.
    ///
    /// The id comes from the response's `Location` header. A duplicate
    /// username surfaces as a conflict error carrying the server's message
    /// verbatim.
    pub async fn create(&self, user: &NewUser) -> Result<String, Error> {
        self.inner.post_create("users", user).await
    }

    /// Updates a user.
    ///
    /// The full representation is sent, including any extra attributes the
    /// user was fetched with, so fetch-modify-update does not drop fields
    /// this crate does not model.
    pub async fn update(&self, user: &User) -> Result<(), Error> {
        let path = format!("users/{}", urlencoding::encode(&user.id));
        self.inner.put_json(&path, user).await
    }

    /// Deletes a user by its server-assigned id.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let path = format!("users/{}", urlencoding::encode(id));
        self.inner.delete(&path).await
    }

    /// Returns the role-mapping facade for one user.
    pub fn roles(&self, user_id: impl Into<String>) -> UserRolesApi {
        UserRolesApi::new(Arc::clone(&self.inner), user_id)
    }
}

impl std::fmt::Debug for UsersApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsersApi").finish_non_exhaustive()
    }
}

/// Facade for the role mappings of one user.
///
/// Access via [`UsersApi::roles()`]. Realm-level and client-level mappings
/// are covered; [`all()`](Self::all) flattens both into one list.
///
/// ## Example
///
/// ```rust,ignore
/// let roles = admin.users().roles(&user.id);
///
/// let everything = roles.all().await?;
/// let in_account = roles.for_client(&account_client.id).await?;
/// ```
#[derive(Clone)]
pub struct UserRolesApi {
    inner: Arc<ClientInner>,
    user_id: String,
}

impl UserRolesApi {
    /// Creates a new user-roles facade.
    pub(crate) fn new(inner: Arc<ClientInner>, user_id: impl Into<String>) -> Self {
        Self {
            inner,
            user_id: user_id.into(),
        }
    }

    /// Returns the scoped user's server-assigned id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn mappings_path(&self) -> String {
        format!("users/{}/role-mappings", urlencoding::encode(&self.user_id))
    }

    fn client_level_path(&self, client_id: &str) -> String {
        format!(
            "users/{}/role-mappings/clients/{}",
            urlencoding::encode(&self.user_id),
            urlencoding::encode(client_id)
        )
    }

    /// Fetches the user's role mappings grouped as the server reports them.
    pub async fn mappings(&self) -> Result<RoleMappings, Error> {
        self.inner.get_json(&self.mappings_path()).await
    }

    /// Lists every role mapped to the user, realm roles first.
    ///
    /// Flattens [`mappings()`](Self::mappings): realm-level roles keep no
    /// owner, client-level roles carry the owning client's id. A user with
    /// no mappings yields an empty list.
    pub async fn all(&self) -> Result<Vec<Role>, Error> {
        Ok(self.mappings().await?.flatten())
    }

    /// Lists the roles of one client mapped to the user.
    ///
    /// Unlike [`all()`](Self::all), a client id the server cannot resolve
    /// propagates as an error here rather than an empty list.
    pub async fn for_client(&self, client_id: &str) -> Result<Vec<Role>, Error> {
        let roles: Vec<Role> = self
            .inner
            .get_list(&self.client_level_path(client_id), DecodePolicy::Strict)
            .await?;
        Ok(roles
            .into_iter()
            .map(|role| role.with_owner(client_id))
            .collect())
    }

    /// Lists the client's roles the user does not have yet.
    pub async fn available_for_client(&self, client_id: &str) -> Result<Vec<Role>, Error> {
        let path = format!("{}/available", self.client_level_path(client_id));
        let roles: Vec<Role> = self.inner.get_list(&path, DecodePolicy::Strict).await?;
        Ok(roles
            .into_iter()
            .map(|role| role.with_owner(client_id))
            .collect())
    }

    /// Maps client roles onto the user.
    ///
    /// Each role must carry the id and name the server knows it by; fetch
    /// them through [`available_for_client()`](Self::available_for_client)
    /// or [`ClientRolesApi::all()`](crate::api::ClientRolesApi::all) first.
    pub async fn add_for_client(&self, client_id: &str, roles: &[Role]) -> Result<(), Error> {
        self.inner
            .post_json(&self.client_level_path(client_id), roles)
            .await
    }

    /// Removes client roles from the user.
    pub async fn remove_for_client(&self, client_id: &str, roles: &[Role]) -> Result<(), Error> {
        self.inner
            .delete_json(&self.client_level_path(client_id), roles)
            .await
    }
}

impl std::fmt::Debug for UserRolesApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRolesApi")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
