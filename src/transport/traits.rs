//! The transport seam: one trait, plus the request and response types
//! that cross it.
//!
//! Everything above this seam is HTTP-agnostic; everything below it is
//! swappable between the real REST transport and the in-memory mock.

use bytes::Bytes;

use crate::Error;

// ============================================================================
// Method
// ============================================================================

/// HTTP methods used by the admin API.
///
/// ## Example
///
/// ```rust
/// use keycloak_admin::transport::Method;
///
/// let method = Method::Get;
/// assert_eq!(method.as_str(), "GET");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - read a resource or collection.
    Get,
    /// POST - create a resource or attach mappings.
    Post,
    /// PUT - replace a resource.
    Put,
    /// DELETE - remove a resource or detach mappings.
    Delete,
}

impl Method {
    /// The HTTP verb, uppercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Admin Request
// ============================================================================

/// A single request against the admin API.
///
/// `path` is relative to the realm's admin root
/// (`{base}/admin/realms/{realm}/`), query string included. Bodies are
/// pre-serialized JSON.
///
/// ## Example
///
/// ```rust
/// use keycloak_admin::transport::{AdminRequest, Method};
///
/// let request = AdminRequest::get("users/190fab9c/role-mappings");
/// assert_eq!(request.method, Method::Get);
/// assert!(request.body.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct AdminRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the realm's admin root, query string included.
    pub path: String,
    /// Pre-serialized JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl AdminRequest {
    /// Builds a bodyless GET of `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Builds a POST of `body` to `path`.
    pub fn post(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Builds a PUT of `body` to `path`.
    pub fn put(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Builds a bodyless DELETE of `path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }

    /// Builds a DELETE carrying a JSON body.
    ///
    /// Role-mapping removal endpoints take the mappings to detach in the
    /// request body.
    pub fn delete_with_body(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: Some(body),
        }
    }
}

// ============================================================================
// Admin Response
// ============================================================================

/// A response from the admin API.
///
/// Transports return a response for **every** HTTP status and only fail on
/// network faults (DNS, TLS, timeouts, malformed transfers). Reading meaning
/// into the status, like 404 as absence or 409 as conflict, happens above
/// the transport, as does pulling ids out of the `Location` header.
#[derive(Debug, Clone)]
pub struct AdminResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: Bytes,
}

impl AdminResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the first header with the given name, matched
    /// case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// What it takes to carry an admin request to a server.
///
/// Implemented by [`RestTransport`](crate::transport::RestTransport) and by
/// the in-memory mock. Deliberately a single method, so the interpretation
/// logic above it never needs to know which one it is talking to.
#[async_trait::async_trait]
pub trait AdminTransport: Send + Sync {
    /// Executes a request and returns the response.
    ///
    /// Errors only represent network-level failures. A 404 or 500 from the
    /// server is an `Ok` response carrying that status.
    async fn execute(&self, request: AdminRequest) -> Result<AdminResponse, Error>;
}
