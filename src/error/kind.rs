//! Error categories and their HTTP status mappings.

/// What went wrong, as a category stable enough to `match` on.
///
/// The admin API reports most failures through HTTP statuses; this enum
/// normalizes them, adds the client-side failure modes (connection faults,
/// decode failures, misconfiguration), and classifies each as retriable or
/// not:
///
/// | ErrorKind         | Retriable | Action                       |
/// |-------------------|-----------|------------------------------|
/// | `Unavailable`     | Yes       | Retry with backoff           |
/// | `Timeout`         | Yes       | Retry with backoff           |
/// | `RateLimited`     | Yes       | Use `retry_after()` delay    |
/// | `Connection`      | Yes       | Retry with backoff           |
/// | `Unauthorized`    | No        | Fix credentials              |
/// | `Forbidden`       | No        | Fix permissions              |
/// | `NotFound`        | No        | Resource doesn't exist       |
/// | `Conflict`        | No*       | Resolve conflict first       |
/// | `MissingLocation` | No        | Resource created, id unknown |
/// | `InvalidArgument` | No        | Fix input                    |
///
/// *Conflict errors may be retriable after resolving the underlying conflict
/// (e.g. deleting the duplicate resource).
///
/// The client itself performs no retries; this classification is a hint for
/// callers wrapping operations in their own resilience layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The server rejected the credentials.
    ///
    /// With client credentials this points at a wrong secret or a disabled
    /// service account; with a bearer token, usually an expired token.
    /// Maps from HTTP 401; retrying without new credentials cannot help.
    #[error("unauthorized")]
    Unauthorized,

    /// Credentials were accepted but lack the required permissions.
    ///
    /// The service account typically needs realm-management roles such as
    /// `manage-users` or `manage-clients` for the operation attempted.
    /// Maps from HTTP 403; grant the missing role, then retry.
    #[error("forbidden")]
    Forbidden,

    /// No such resource on the server.
    ///
    /// Single-entity lookups (`find`, `try_find`) convert HTTP 404 into
    /// `Ok(None)` instead; this kind only surfaces on paths where absence
    /// is an error (e.g. role mappings for an unknown client id).
    #[error("not found")]
    NotFound,

    /// The server rejected the request payload or parameters.
    ///
    /// Maps from HTTP 400; the call will keep failing until the input
    /// changes.
    #[error("invalid argument")]
    InvalidArgument,

    /// The write collided with existing state.
    ///
    /// Maps from HTTP 409, raised on creation when the name is already
    /// taken in its scope (duplicate username, duplicate role name). When
    /// the server supplied a decodable `errorMessage`, it becomes the error
    /// message verbatim. Retry only after resolving the collision, e.g. by
    /// deleting the duplicate.
    #[error("conflict")]
    Conflict,

    /// The server is throttling this client.
    ///
    /// Maps from HTTP 429. Retriable; `Error::retry_after()` carries the
    /// server's requested delay when one was sent.
    #[error("rate limited")]
    RateLimited,

    /// The server cannot take requests right now.
    ///
    /// Maps from HTTP 503, seen during startup and rolling restarts.
    /// Retriable with backoff.
    #[error("service unavailable")]
    Unavailable,

    /// The request ran out of time, client-side or at a gateway.
    ///
    /// Maps from HTTP 504, or the configured request timeout fired.
    /// Retriable with backoff.
    #[error("timeout")]
    Timeout,

    /// The server failed while handling the request.
    ///
    /// Maps from HTTP 500. Retrying rarely helps; the failure sits on the
    /// server's side.
    #[error("internal error")]
    Internal,

    /// The request never completed an HTTP exchange.
    ///
    /// Covers DNS failures, refused connections, TLS handshake problems,
    /// and connections dropped mid-request. Usually transient, so
    /// retriable.
    #[error("connection error")]
    Connection,

    /// The exchange completed but made no sense at the HTTP level.
    ///
    /// Maps from HTTP 502, or a response violating the protocol. Often a
    /// misbehaving proxy in the path.
    #[error("protocol error")]
    Protocol,

    /// Response body could not be decoded as the expected type.
    ///
    /// Three composite-role read paths deliberately collapse this condition
    /// into an empty result instead; everywhere else it surfaces as this
    /// kind. Nothing to retry without a server-side fix.
    #[error("invalid response")]
    InvalidResponse,

    /// Creation succeeded (HTTP 201) but the response carried no `Location`
    /// header, so the new resource's id cannot be reported.
    ///
    /// The resource **was** created server-side. Callers must treat this as
    /// a partial failure (look the resource up by name, or clean it up) and
    /// must not assume the creation failed. Retrying would create a
    /// duplicate or hit `Conflict`.
    #[error("created but no location header")]
    MissingLocation,

    /// The client was built or called with unusable settings.
    ///
    /// Covers unparseable URLs and missing realm or credentials.
    #[error("configuration error")]
    Configuration,

    /// None of the above.
    ///
    /// The catch-all for status codes outside the recognized set.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Whether a retry has a chance of succeeding without other action.
    ///
    /// ```rust
    /// use keycloak_admin::ErrorKind;
    ///
    /// assert!(ErrorKind::Unavailable.is_retriable());
    /// assert!(!ErrorKind::MissingLocation.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::Connection
        )
    }

    /// The HTTP status this kind maps back to.
    ///
    /// Useful when re-exposing client errors over HTTP, e.g. from a proxy
    /// service built on this crate.
    #[inline]
    pub fn http_status_code(&self) -> u16 {
        match self {
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidArgument => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::RateLimited => 429,
            ErrorKind::Unavailable => 503,
            ErrorKind::Timeout => 504,
            ErrorKind::Internal => 500,
            ErrorKind::Connection => 502,
            ErrorKind::Protocol => 502,
            ErrorKind::InvalidResponse | ErrorKind::MissingLocation => 502,
            ErrorKind::Configuration => 500,
            ErrorKind::Unknown => 500,
        }
    }

    /// The kind a server status maps to.
    ///
    /// Recognized statuses map directly; the rest of the 4xx range becomes
    /// `InvalidArgument`, the rest of 5xx becomes `Internal`, and anything
    /// below 400 is `Unknown`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            502 => ErrorKind::Protocol,
            503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        }
    }
}
