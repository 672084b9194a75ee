//! What goes wrong, and how callers tell the cases apart.
//!
//! Every fallible operation returns [`Result`] with [`Error`], which carries
//! an [`ErrorKind`] for matching plus the HTTP status of the response it was
//! derived from.
//!
//! ## Key Invariant
//!
//! Single-entity lookups return `Ok(None)` for an absent resource, not `Err`.
//! A 404 only surfaces as `ErrorKind::NotFound` on paths where the resource
//! is expected to exist (e.g. listing role mappings of an unknown client).
//!
//! ```rust,ignore
//! // find() - absence is Ok(None)
//! let user = admin.users().find("190fab9c-...").await?;
//! assert!(user.is_none());
//!
//! // for_client() - an unknown client id is Err(NotFound)
//! let err = admin.users().roles(&user_id).for_client("no-such-id").await;
//! assert!(err.is_err());
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
