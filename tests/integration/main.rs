//! Integration tests for the Keycloak admin client.
//!
//! These tests run against a live Keycloak instance, e.g.:
//!   docker run -p 8080:8080 -e KC_BOOTSTRAP_ADMIN_USERNAME=admin \
//!     -e KC_BOOTSTRAP_ADMIN_PASSWORD=admin quay.io/keycloak/keycloak start-dev
//!
//! # Running
//!
//! ```bash
//! # Single-threaded, so fixtures never collide
//! cargo test --features integration-tests --test integration -- --test-threads=1
//!
//! # Same, with println! output visible
//! cargo test --features integration-tests --test integration -- --test-threads=1 --nocapture
//!
//! # One test only
//! cargo test --features integration-tests --test integration test_user_lifecycle -- --nocapture
//! ```
//!
//! # Environment Variables
//!
//! - `KEYCLOAK_URL`: Server base URL (default: `http://localhost:8080`)
//! - `KEYCLOAK_REALM`: Realm under test (default: `master`)
//! - `KEYCLOAK_CLIENT_ID`: Service account client id (default: `admin-cli`)
//! - `KEYCLOAK_CLIENT_SECRET`: Service account client secret (required)
//!
//! # Prerequisites
//!
//! 1. The service account client must exist in the realm with "Service
//!    accounts roles" enabled
//! 2. Its service account needs the realm's admin roles (manage-users,
//!    manage-clients, view-clients)

mod client_tests;
mod common;
mod role_tests;
mod user_tests;
