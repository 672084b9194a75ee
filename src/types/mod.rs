//! Entity types for the admin API.
//!
//! This module provides the value objects the API operations exchange:
//!
//! - [`Client`]: An application registered in the realm
//! - [`User`] / [`NewUser`]: Realm accounts and the creation payload
//! - [`Role`] / [`CompositeRole`]: Realm and client scoped permissions
//! - [`RoleMappings`]: A user's role assignments, grouped the way the server
//!   reports them
//!
//! All of these are plain values. The API never caches or retains them
//! between calls.

mod client;
mod role;
mod role_mappings;
mod user;

pub use client::{Client, ProtocolMapper};
pub use role::{CompositeRole, Role};
pub use role_mappings::{ClientRoleMappings, RoleMappings};
pub use user::{NewUser, User, UserQuery};
