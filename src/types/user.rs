//! User account types and search filters.

use serde::{Deserialize, Serialize};

/// A realm account.
///
/// The server's user representation is an open-ended bag of fields. The
/// profile fields this library works with are typed; everything else the
/// server sent is preserved in [`extra`](User::extra) and written back
/// unchanged on update, so updating a user never silently drops attributes
/// this library does not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned id.
    pub id: String,

    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub username: Option<String>,

    /// First name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_name: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,

    /// Whether the account is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Every other field the server sent, round-tripped verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload for creating a user.
///
/// Carries only the fields the creation endpoint accepts; the server assigns
/// the id, which the create operation recovers from the response.
///
/// ```rust
/// use keycloak_admin::NewUser;
///
/// let user = NewUser::new("j.doe", "Jane", "Doe", "j.doe@example.com");
/// assert!(user.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Login name, unique per realm.
    pub username: String,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Email address.
    pub email: String,

    /// Whether the account starts out enabled. Defaults to `true`.
    pub enabled: bool,
}

impl NewUser {
    /// Creates an enabled user payload.
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            enabled: true,
        }
    }

    /// Marks the account as disabled at creation time.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Search filter for the user listing endpoint.
///
/// Parameters are passed through to the server as query-string pairs, in the
/// order they were added. The named setters cover the common filters; any
/// other parameter the server understands can go through
/// [`param`](UserQuery::param).
///
/// ```rust
/// use keycloak_admin::UserQuery;
///
/// let query = UserQuery::new().username("j.doe").max(10);
/// assert_eq!(query.to_query_string(), "username=j.doe&max=10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    params: Vec<(String, String)>,
}

impl UserQuery {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters on login name.
    #[must_use]
    pub fn username(self, username: impl Into<String>) -> Self {
        self.param("username", username)
    }

    /// Filters on email address.
    #[must_use]
    pub fn email(self, email: impl Into<String>) -> Self {
        self.param("email", email)
    }

    /// Filters on first name.
    #[must_use]
    pub fn first_name(self, first_name: impl Into<String>) -> Self {
        self.param("firstName", first_name)
    }

    /// Filters on last name.
    #[must_use]
    pub fn last_name(self, last_name: impl Into<String>) -> Self {
        self.param("lastName", last_name)
    }

    /// Free-text search across username, names and email.
    #[must_use]
    pub fn search(self, search: impl Into<String>) -> Self {
        self.param("search", search)
    }

    /// Filters on the enabled flag.
    #[must_use]
    pub fn enabled(self, enabled: bool) -> Self {
        self.param("enabled", enabled.to_string())
    }

    /// Requests brief representations without attributes.
    #[must_use]
    pub fn brief(self, brief: bool) -> Self {
        self.param("briefRepresentation", brief.to_string())
    }

    /// Pagination offset.
    #[must_use]
    pub fn first(self, first: u32) -> Self {
        self.param("first", first.to_string())
    }

    /// Maximum number of results.
    #[must_use]
    pub fn max(self, max: u32) -> Self {
        self.param("max", max.to_string())
    }

    /// Adds an arbitrary query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Returns `true` when no parameters were set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders the filter as a URL-encoded query string, without the `?`.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
