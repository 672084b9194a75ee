//! The error type returned by every admin operation.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use super::ErrorKind;

/// The error type every operation returns.
///
/// Each error carries a category ([`kind()`](Error::kind)) meant for
/// `match`, a human-readable message, and whatever the failed exchange left
/// behind: the HTTP status of the server's answer
/// ([`status()`](Error::status)), the parsed `Retry-After` delay on rate
/// limits ([`retry_after()`](Error::retry_after)), and the underlying cause
/// exposed through the standard `source()` chain.
///
/// A status is only present when the server actually answered. Connection
/// faults, timeouts raised client-side, and configuration mistakes carry
/// `None`.
///
/// ## Example
///
/// ```rust
/// use keycloak_admin::{Error, ErrorKind};
///
/// fn handle_error(err: Error) {
///     match err.kind() {
///         ErrorKind::Conflict => {
///             // Message carries the server's errorMessage when one was sent,
///             // e.g. "User exists with same username".
///             println!("Already exists: {}", err);
///         }
///         ErrorKind::MissingLocation => {
///             // The resource WAS created; only its id is unknown.
///             println!("Created, but no id reported: {}", err);
///         }
///         kind if kind.is_retriable() => {
///             println!("worth retrying: {}", err);
///         }
///         _ => {
///             println!("giving up: {}", err);
///         }
///     }
///
///     if let Some(status) = err.status() {
///         eprintln!("server answered with {status}");
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    status: Option<u16>,
    retry_after: Option<Duration>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// An error of the given kind with a specific message.
    ///
    /// ```rust
    /// use keycloak_admin::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::InvalidArgument, "username cannot be empty");
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            retry_after: None,
            source: None,
        }
    }

    /// An error of the given kind with that kind's stock message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Unauthorized => "authentication failed",
            ErrorKind::Forbidden => "permission denied",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::Conflict => "resource conflict",
            ErrorKind::RateLimited => "rate limit exceeded",
            ErrorKind::Unavailable => "service unavailable",
            ErrorKind::Timeout => "request timed out",
            ErrorKind::Internal => "internal server error",
            ErrorKind::Connection => "connection failed",
            ErrorKind::Protocol => "protocol error",
            ErrorKind::InvalidResponse => "invalid response body",
            ErrorKind::MissingLocation => "created but no Location header received",
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Unknown => "unknown error",
        };
        Self::new(kind, message)
    }

    /// An error derived from an HTTP status, with the status recorded.
    ///
    /// The kind comes from [`ErrorKind::from_http_status`].
    pub fn from_status(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::from_http_status(status), message).with_status(status)
    }

    /// The category this error falls into.
    ///
    /// ```rust
    /// use keycloak_admin::{Error, ErrorKind};
    ///
    /// fn is_absence(err: &Error) -> bool {
    ///     err.kind() == ErrorKind::NotFound
    /// }
    /// ```
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status of the server response behind this error.
    ///
    /// `None` when no response was involved, which covers connection
    /// failures, client-side timeouts, and configuration mistakes.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The delay the server asked for, parsed from `Retry-After`.
    #[inline]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Shorthand for `self.kind().is_retriable()`.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Records the HTTP status this error was derived from.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Records the server-requested retry delay.
    #[must_use]
    pub fn with_retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Shorthand constructors, one per kind that takes a message.

    /// Builds an [`ErrorKind::Unauthorized`] error.
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Builds an [`ErrorKind::Forbidden`] error.
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Builds an [`ErrorKind::NotFound`] error.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Builds an [`ErrorKind::InvalidArgument`] error.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Builds an [`ErrorKind::Conflict`] error carrying the server's message.
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Builds an [`ErrorKind::RateLimited`] error, with the delay when the
    /// server sent one.
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        let mut err = Self::from_kind(ErrorKind::RateLimited);
        if let Some(duration) = retry_after {
            err.retry_after = Some(duration);
        }
        err
    }

    /// Builds an [`ErrorKind::Unavailable`] error.
    pub fn unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// Builds an [`ErrorKind::Timeout`] error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Builds an [`ErrorKind::Internal`] error.
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Builds an [`ErrorKind::Connection`] error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Builds an [`ErrorKind::Protocol`] error.
    pub fn protocol(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Protocol, message)
    }

    /// Builds an [`ErrorKind::InvalidResponse`] error.
    pub fn invalid_response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Builds an [`ErrorKind::MissingLocation`] error.
    ///
    /// Raised when a creation returned 201 without a `Location` header. The
    /// resource exists server-side; only its id could not be determined.
    pub fn missing_location(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MissingLocation, message)
    }

    /// Builds an [`ErrorKind::Configuration`] error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(status) = self.status {
            write!(f, " (status: {status})")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected => ErrorKind::Connection,
            std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            _ => ErrorKind::Internal,
        };
        Error::new(kind, err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {err}")).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_response(format!("JSON decode failed: {err}")).with_source(err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_bare() {
        let err = Error::new(ErrorKind::InvalidArgument, "username cannot be empty");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("username cannot be empty"));
        assert!(err.status().is_none());
        assert!(err.retry_after().is_none());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_kind_supplies_stock_message() {
        let err = Error::from_kind(ErrorKind::MissingLocation);
        assert_eq!(err.kind(), ErrorKind::MissingLocation);
        assert!(err
            .to_string()
            .contains("created but no Location header received"));
    }

    #[test]
    fn test_from_status_derives_kind_and_records_status() {
        let err = Error::from_status(409, "User exists with same username");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().contains("User exists with same username"));
    }

    #[test]
    fn test_display_appends_status_when_present() {
        let err = Error::new(ErrorKind::NotFound, "no role named report-viewer").with_status(404);
        assert_eq!(
            err.to_string(),
            "not found: no role named report-viewer (status: 404)"
        );

        let bare = Error::connection("connection refused");
        assert!(!bare.to_string().contains("status"));
    }

    #[test]
    fn test_rate_limited_carries_the_delay() {
        let throttled = Error::rate_limited(Some(Duration::from_secs(30)));
        assert_eq!(throttled.kind(), ErrorKind::RateLimited);
        assert_eq!(throttled.retry_after(), Some(Duration::from_secs(30)));

        let unspecified = Error::rate_limited(None);
        assert!(unspecified.retry_after().is_none());
    }

    #[test]
    fn test_retriable_split() {
        for kind in [
            ErrorKind::Timeout,
            ErrorKind::Unavailable,
            ErrorKind::RateLimited,
            ErrorKind::Connection,
        ] {
            assert!(Error::from_kind(kind).is_retriable(), "{kind:?}");
        }
        for kind in [
            ErrorKind::Unauthorized,
            ErrorKind::Conflict,
            ErrorKind::MissingLocation,
            ErrorKind::InvalidResponse,
        ] {
            assert!(!Error::from_kind(kind).is_retriable(), "{kind:?}");
        }
    }

    #[test]
    fn test_source_chain_is_preserved() {
        let io_err = std::io::Error::other("socket closed");
        let err = Error::connection("connection lost").with_source(io_err);
        let source = err.source().unwrap();
        assert!(source.to_string().contains("socket closed"));
    }

    #[test]
    fn test_shorthand_constructors_pick_their_kind() {
        let table: Vec<(Error, ErrorKind)> = vec![
            (Error::unauthorized("m"), ErrorKind::Unauthorized),
            (Error::forbidden("m"), ErrorKind::Forbidden),
            (Error::not_found("m"), ErrorKind::NotFound),
            (Error::invalid_argument("m"), ErrorKind::InvalidArgument),
            (Error::conflict("m"), ErrorKind::Conflict),
            (Error::unavailable("m"), ErrorKind::Unavailable),
            (Error::timeout("m"), ErrorKind::Timeout),
            (Error::internal("m"), ErrorKind::Internal),
            (Error::connection("m"), ErrorKind::Connection),
            (Error::protocol("m"), ErrorKind::Protocol),
            (Error::invalid_response("m"), ErrorKind::InvalidResponse),
            (Error::missing_location("m"), ErrorKind::MissingLocation),
            (Error::configuration("m"), ErrorKind::Configuration),
        ];
        for (err, expected) in table {
            assert_eq!(err.kind(), expected);
        }
    }

    #[test]
    fn test_from_error_kind() {
        let err: Error = ErrorKind::Timeout.into();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[test]
    fn test_io_error_kinds_map_sensibly() {
        let cases = [
            (std::io::ErrorKind::TimedOut, ErrorKind::Timeout),
            (std::io::ErrorKind::NotFound, ErrorKind::NotFound),
            (std::io::ErrorKind::PermissionDenied, ErrorKind::Forbidden),
            (std::io::ErrorKind::ConnectionRefused, ErrorKind::Connection),
            (std::io::ErrorKind::BrokenPipe, ErrorKind::Internal),
        ];
        for (io_kind, expected) in cases {
            let err: Error = std::io::Error::new(io_kind, "io fault").into();
            assert_eq!(err.kind(), expected, "{io_kind:?}");
        }
    }

    #[test]
    fn test_url_parse_error_is_a_configuration_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = parse_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("invalid URL"));
    }

    #[test]
    fn test_bad_json_is_an_invalid_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert!(err.source().is_some());
    }
}
