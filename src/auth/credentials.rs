//! Credential types accepted by the admin client.

use std::fmt;
use std::sync::Arc;

/// How the admin client authenticates against the server.
///
/// Two methods are supported:
///
/// - `ClientCredentials`: the client trades a confidential client's id and
///   secret for an access token at the realm's token endpoint, and keeps
///   the token fresh on its own. Recommended for anything long-running.
/// - `Bearer`: a token obtained elsewhere is attached as-is. When it
///   expires, requests start failing with `Unauthorized`.
///
/// Both config types convert into this enum, so builder callers rarely
/// name it directly:
///
/// ```rust,ignore
/// let admin = KeycloakAdmin::builder()
///     .url("https://id.example.com")
///     .realm("master")
///     .credentials(ClientCredentialsConfig::new("backend-admin", "1337aabbcc"))
///     .build()
///     .await?;
/// ```
#[derive(Debug)]
pub enum Credentials {
    /// OAuth 2.0 client credentials grant against the realm's token endpoint.
    ClientCredentials(ClientCredentialsConfig),

    /// A pre-issued bearer token, attached verbatim.
    Bearer(BearerCredentialsConfig),
}

impl Credentials {
    /// Returns `true` for the client credentials variant.
    pub fn is_client_credentials(&self) -> bool {
        matches!(self, Credentials::ClientCredentials(_))
    }

    /// Returns `true` for the bearer token variant.
    pub fn is_bearer(&self) -> bool {
        matches!(self, Credentials::Bearer(_))
    }

    /// The client credentials config, when that is the active variant.
    pub fn as_client_credentials(&self) -> Option<&ClientCredentialsConfig> {
        match self {
            Credentials::ClientCredentials(config) => Some(config),
            _ => None,
        }
    }

    /// The bearer config, when that is the active variant.
    pub fn as_bearer(&self) -> Option<&BearerCredentialsConfig> {
        match self {
            Credentials::Bearer(config) => Some(config),
            _ => None,
        }
    }
}

impl From<ClientCredentialsConfig> for Credentials {
    fn from(config: ClientCredentialsConfig) -> Self {
        Credentials::ClientCredentials(config)
    }
}

impl From<BearerCredentialsConfig> for Credentials {
    fn from(config: BearerCredentialsConfig) -> Self {
        Credentials::Bearer(config)
    }
}

/// Id and secret of a confidential client with a service account.
///
/// Server-side setup before this works: the realm needs a confidential
/// client with "Service accounts roles" enabled, and the service account
/// needs the `realm-management` roles matching what the code touches
/// (`manage-users`, `manage-clients`, or the narrower `query-*`/`view-*`
/// roles for read-only use).
///
/// The transport requests a token on first use and replaces it shortly
/// before expiry. Nothing beyond the id and secret needs to be managed by
/// the caller.
///
/// ```rust
/// use keycloak_admin::ClientCredentialsConfig;
///
/// let config = ClientCredentialsConfig::new("backend-admin", "1337aabbcc");
/// ```
pub struct ClientCredentialsConfig {
    /// The confidential client's OAuth client id.
    pub client_id: String,

    /// Its secret, sent in the token exchange only.
    pub client_secret: String,
}

impl ClientCredentialsConfig {
    /// Builds a config from a client id and its secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// The secret must never reach logs, so Debug is written out by hand.
impl fmt::Debug for ClientCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// A pre-issued access token, used without refresh.
///
/// Handy when token acquisition already happens elsewhere (a sidecar, a
/// test harness logging in as `admin-cli`) or for short scripts where a
/// token pasted from `kcadm.sh` is good enough. The token is shared behind
/// an `Arc`, so cloning the config is cheap.
///
/// There is no refresh for this variant. Once the token expires the server
/// answers 401 and calls surface `Unauthorized`.
#[derive(Clone)]
pub struct BearerCredentialsConfig {
    token: Arc<str>,
}

impl BearerCredentialsConfig {
    /// Wraps an access token obtained out of band.
    ///
    /// ```rust
    /// use keycloak_admin::BearerCredentialsConfig;
    ///
    /// let config = BearerCredentialsConfig::new("eyJhbGciOiJSUzI1NiI...");
    /// ```
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    /// The wrapped token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for BearerCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredentialsConfig")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl<S: Into<String>> From<S> for BearerCredentialsConfig {
    fn from(token: S) -> Self {
        Self::new(token)
    }
}
