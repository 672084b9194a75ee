//! HTTP transport built on reqwest.
//!
//! Carries every admin call to `{base}/admin/realms/{realm}/` and performs
//! the OAuth 2.0 client credentials exchange against the realm's token
//! endpoint when needed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use url::Url;

use crate::auth::Credentials;
use crate::config::TlsConfig;
use crate::transport::traits::{AdminRequest, AdminResponse, AdminTransport, Method};
use crate::user_agent;
use crate::Error;

/// Tokens are treated as expired this long before their actual expiry, so a
/// request never goes out with a token about to lapse mid-flight.
const TOKEN_EXPIRY_LEEWAY: Duration = Duration::from_secs(10);

// ============================================================================
// REST Transport
// ============================================================================

/// The production transport.
///
/// Sends admin requests under `{base}/admin/realms/{realm}/` and obtains
/// access tokens from `{base}/realms/{realm}/protocol/openid-connect/token`.
///
/// Clones share the HTTP connection pool and the cached access token.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    admin_base: Url,
    token_endpoint: Url,
    credentials: Arc<Credentials>,
    token: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("admin_base", &self.admin_base.as_str())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Starts a transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }

    /// Constructs a transport for one realm of one server.
    pub fn new(
        base_url: Url,
        realm: &str,
        credentials: Credentials,
        tls_config: &TlsConfig,
        timeout: Duration,
    ) -> Result<Self, Error> {
        Ok(Self {
            client: http_client(tls_config, timeout)?,
            admin_base: admin_base_url(&base_url, realm)?,
            token_endpoint: token_endpoint_url(&base_url, realm)?,
            credentials: Arc::new(credentials),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Assembles the header set for one admin request.
    fn request_headers(&self, token: &str, has_body: bool) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            Error::unauthorized("bearer token contains characters not allowed in a header")
        })?;
        headers.insert(AUTHORIZATION, bearer);

        Ok(headers)
    }

    /// Returns a valid bearer token, exchanging credentials if needed.
    async fn bearer_token(&self) -> Result<String, Error> {
        let config = match self.credentials.as_ref() {
            Credentials::Bearer(config) => return Ok(config.token().to_string()),
            Credentials::ClientCredentials(config) => config,
        };

        // The read guard must not be held across the exchange below.
        {
            let guard = self.token.read();
            if let Some(ref cached) = *guard {
                if cached.expires_at > Instant::now() {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let fresh = self
            .fetch_token(&config.client_id, &config.client_secret)
            .await?;
        let expires_at = Instant::now()
            + Duration::from_secs(fresh.expires_in).saturating_sub(TOKEN_EXPIRY_LEEWAY);
        let access_token = fresh.access_token.clone();

        // Concurrent refreshes may race; last writer wins, both tokens are valid.
        *self.token.write() = Some(CachedToken {
            access_token: fresh.access_token,
            expires_at,
        });

        Ok(access_token)
    }

    /// Performs the client credentials grant against the token endpoint.
    async fn fetch_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse, Error> {
        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint = %self.token_endpoint, "requesting access token");

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];

        let response = self
            .client
            .post(self.token_endpoint.clone())
            .form(&params)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(token_grant_error(status.as_u16(), &error_text));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| Error::invalid_response(format!("undecodable token response: {e}")))
    }
}

#[async_trait::async_trait]
impl AdminTransport for RestTransport {
    async fn execute(&self, request: AdminRequest) -> Result<AdminResponse, Error> {
        let url = self
            .admin_base
            .join(&request.path)
            .map_err(|e| Error::configuration(format!("request path did not resolve: {e}")))?;

        let token = self.bearer_token().await?;
        let headers = self.request_headers(&token, request.body.is_some())?;

        let mut req = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        }
        .headers(headers);
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status,
            "admin API request completed"
        );

        Ok(AdminResponse {
            status,
            headers,
            body,
        })
    }
}

/// Assembles the underlying reqwest client, applying the TLS settings.
fn http_client(tls: &TlsConfig, timeout: Duration) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent::user_agent());

    if tls.skip_verification {
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(ref path) = tls.ca_cert_file {
        let pem = std::fs::read(path).map_err(|e| {
            Error::configuration(format!("could not read CA certificate {}: {e}", path.display()))
        })?;
        let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
            Error::configuration(format!("CA certificate {} is not PEM: {e}", path.display()))
        })?;
        builder = builder.add_root_certificate(cert);
    }

    if let Some(ref pem) = tls.ca_cert_pem {
        let cert = reqwest::Certificate::from_pem(pem.as_bytes())
            .map_err(|e| Error::configuration(format!("inline CA certificate is not PEM: {e}")))?;
        builder = builder.add_root_certificate(cert);
    }

    builder
        .build()
        .map_err(|e| Error::configuration(format!("could not assemble HTTP client: {e}")))
}

// ============================================================================
// REST Transport Builder
// ============================================================================

/// Plain builder for [`RestTransport`], for callers that want the transport
/// without going through [`KeycloakAdmin`](crate::KeycloakAdmin).
#[derive(Debug)]
pub struct RestTransportBuilder {
    base_url: Option<Url>,
    realm: Option<String>,
    credentials: Option<Credentials>,
    tls_config: TlsConfig,
    timeout: Duration,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            realm: None,
            credentials: None,
            tls_config: TlsConfig::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the server root URL. Fails immediately if it does not parse.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        self.base_url = Some(
            Url::parse(url.as_ref())
                .map_err(|e| Error::configuration(format!("invalid base URL: {e}")))?,
        );
        Ok(self)
    }

    /// Sets the realm whose admin API is addressed.
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Sets the credentials.
    pub fn credentials(mut self, credentials: impl Into<Credentials>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }

    /// Applies custom TLS trust settings.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the transport, checking that every required piece was set.
    pub fn build(self) -> Result<RestTransport, Error> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("base URL is required"))?;
        let realm = self
            .realm
            .ok_or_else(|| Error::configuration("Realm is required"))?;
        let credentials = self
            .credentials
            .ok_or_else(|| Error::configuration("credentials are required"))?;

        RestTransport::new(base_url, &realm, credentials, &self.tls_config, self.timeout)
    }
}

// ============================================================================
// Token Endpoint Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_lifetime")]
    expires_in: u64,
}

/// Lifetime assumed when the token endpoint omits `expires_in`.
fn default_token_lifetime() -> u64 {
    60
}

#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

// ============================================================================
// URL Construction
// ============================================================================

fn with_trailing_slash(base: &Url) -> Url {
    let mut url = base.clone();
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    url
}

/// Resolves the realm's admin root: `{base}/admin/realms/{realm}/`.
pub(crate) fn admin_base_url(base: &Url, realm: &str) -> Result<Url, Error> {
    with_trailing_slash(base)
        .join(&format!("admin/realms/{}/", urlencoding::encode(realm)))
        .map_err(|e| Error::configuration(format!("admin base URL did not resolve: {e}")))
}

/// Resolves the realm's OpenID Connect token endpoint.
pub(crate) fn token_endpoint_url(base: &Url, realm: &str) -> Result<Url, Error> {
    with_trailing_slash(base)
        .join(&format!(
            "realms/{}/protocol/openid-connect/token",
            urlencoding::encode(realm)
        ))
        .map_err(|e| Error::configuration(format!("token endpoint URL did not resolve: {e}")))
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Translates reqwest failures into this crate's error type.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    let err = if e.is_timeout() {
        Error::timeout(format!("request timed out: {e}"))
    } else if e.is_connect() {
        Error::connection(format!("could not reach the server: {e}"))
    } else if e.is_request() {
        Error::invalid_argument(format!("request rejected before send: {e}"))
    } else {
        Error::protocol(format!("HTTP exchange failed: {e}"))
    };
    err.with_source(e)
}

/// Maps token endpoint failures to client errors.
///
/// The endpoint reports invalid credentials as 400 or 401 with an
/// `error_description`; both surface as `Unauthorized`.
fn token_grant_error(status: u16, body: &str) -> Error {
    let detail = serde_json::from_str::<TokenErrorBody>(body)
        .ok()
        .and_then(|b| b.error_description.or(b.error));
    let message = match detail {
        Some(detail) => format!("token request failed: {detail}"),
        None => format!("token request failed with status {status}"),
    };

    match status {
        400 | 401 | 403 => Error::unauthorized(message).with_status(status),
        _ => Error::from_status(status, message),
    }
}

// ============================================================================
// Tests
// ============================================================================
