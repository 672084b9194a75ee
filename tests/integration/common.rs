//! Shared harness for the live-server tests.
//!
//! Reads the connection settings from the environment once and hands out
//! the fixtures the test modules build on.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use keycloak_admin::{Client, ClientCredentialsConfig, KeycloakAdmin, NewUser};
use uuid::Uuid;

/// Connection settings for the instance under test.
pub struct TestConfig {
    pub url: String,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
}

static CONFIG: OnceLock<TestConfig> = OnceLock::new();

/// The test configuration, read from the environment on first use.
pub fn config() -> &'static TestConfig {
    CONFIG.get_or_init(|| TestConfig {
        url: std::env::var("KEYCLOAK_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
        realm: std::env::var("KEYCLOAK_REALM").unwrap_or_else(|_| "master".to_string()),
        client_id: std::env::var("KEYCLOAK_CLIENT_ID").unwrap_or_else(|_| "admin-cli".to_string()),
        client_secret: std::env::var("KEYCLOAK_CLIENT_SECRET").unwrap_or_default(),
    })
}

/// Confirms the server is up and the realm exists before any test runs.
///
/// Probes the realm's public endpoint, which needs no credentials.
pub async fn validate_environment() -> Result<()> {
    let config = config();
    let probe = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .danger_accept_invalid_certs(true)
        .build()?;

    let realm_url = format!("{}/realms/{}", config.url, config.realm);
    let response = probe.get(&realm_url).send().await.with_context(|| {
        format!("could not reach {realm_url}; is the server up? main.rs has the docker command")
    })?;

    anyhow::ensure!(
        response.status().is_success(),
        "realm probe returned {}; does realm {:?} exist?",
        response.status(),
        config.realm
    );

    println!("environment ok: {realm_url}");
    Ok(())
}

/// Builds an admin client from the environment configuration.
pub async fn create_admin() -> Result<KeycloakAdmin> {
    let config = config();
    anyhow::ensure!(
        !config.client_secret.is_empty(),
        "KEYCLOAK_CLIENT_SECRET is not set; see main.rs for prerequisites"
    );

    KeycloakAdmin::builder()
        .url(&config.url)
        .insecure()
        .realm(&config.realm)
        .credentials(ClientCredentialsConfig::new(
            &config.client_id,
            &config.client_secret,
        ))
        .build()
        .await
        .context("building the admin client failed")
}

/// Returns a name that will not collide with earlier runs.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Looks up the realm's built-in `account` client.
///
/// Present in every realm, so tests can hang client roles off it without
/// creating a client first.
pub async fn account_client(admin: &KeycloakAdmin) -> Result<Client> {
    admin
        .clients()
        .find_by_client_id("account")
        .await
        .context("listing clients failed")?
        .context("realm has no 'account' client")
}

/// A user created for one test, deleted on cleanup.
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    admin: KeycloakAdmin,
}

impl TestUser {
    /// Creates a fresh user with a unique username.
    pub async fn create(admin: &KeycloakAdmin) -> Result<Self> {
        let username = unique_name("it-user");
        let email = format!("{username}@example.com");
        let id = admin
            .users()
            .create(&NewUser::new(&username, "Integration", "Test", &email))
            .await
            .context("creating the test user failed")?;

        Ok(Self {
            id,
            username,
            email,
            admin: admin.clone(),
        })
    }

    /// Deletes the user.
    pub async fn cleanup(self) -> Result<()> {
        self.admin
            .users()
            .delete(&self.id)
            .await
            .context("deleting the test user failed")
    }
}
