//! Builder for the admin client, checked at compile time.

use std::{marker::PhantomData, time::Duration};

#[cfg(any(test, feature = "rest"))]
use std::sync::Arc;

#[cfg(feature = "rest")]
use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::{auth::Credentials, config::TlsConfig, Error, KeycloakAdmin};

/// Typestate marker: no URL configured yet.
pub struct NoUrl;

/// Typestate marker: a URL has been configured.
pub struct HasUrl;

/// Typestate marker: no credentials configured yet.
pub struct NoCredentials;

/// Typestate marker: credentials have been configured.
pub struct HasCredentials;

/// Builder for [`KeycloakAdmin`] instances.
///
/// The two type parameters track whether `url()` and `credentials()` have
/// been called; `build()` only exists once both have, so forgetting either
/// is a compile error rather than a runtime one. The realm is checked at
/// `build()` instead, since nearly every deployment sets it explicitly
/// anyway.
///
/// Required: `url()` (the server root, without `/admin`), `credentials()`,
/// and `realm()`. Optional: `tls_config()`, `insecure()`, and `timeout()`
/// (default 30 seconds).
///
/// ```rust,ignore
/// use keycloak_admin::{KeycloakAdmin, ClientCredentialsConfig};
///
/// let admin = KeycloakAdmin::builder()
///     .url("https://id.example.com")
///     .realm("customers")
///     .credentials(ClientCredentialsConfig::new("backend-admin", "secret"))
///     .timeout(std::time::Duration::from_secs(10))
///     .build()
///     .await?;
/// ```
pub struct KeycloakAdminBuilder<UrlState, CredentialsState> {
    url: Option<String>,
    realm: Option<String>,
    credentials: Option<Credentials>,
    tls_config: TlsConfig,
    timeout: Option<Duration>,
    _url_state: PhantomData<UrlState>,
    _credentials_state: PhantomData<CredentialsState>,
}

impl KeycloakAdminBuilder<NoUrl, NoCredentials> {
    /// Starts an empty builder.
    ///
    /// [`KeycloakAdmin::builder()`] is the usual way to get one.
    pub fn new() -> Self {
        Self {
            url: None,
            realm: None,
            credentials: None,
            tls_config: TlsConfig::default(),
            timeout: None,
            _url_state: PhantomData,
            _credentials_state: PhantomData,
        }
    }
}

impl Default for KeycloakAdminBuilder<NoUrl, NoCredentials> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> KeycloakAdminBuilder<NoUrl, C> {
    /// Sets the server's base URL.
    ///
    /// Pass the server root (e.g. `https://id.example.com`), not the admin
    /// or realm path. Servers mounted under a subpath work too
    /// (e.g. `https://example.com/auth`).
    pub fn url(self, url: impl Into<String>) -> KeycloakAdminBuilder<HasUrl, C> {
        KeycloakAdminBuilder {
            url: Some(url.into()),
            realm: self.realm,
            credentials: self.credentials,
            tls_config: self.tls_config,
            timeout: self.timeout,
            _url_state: PhantomData,
            _credentials_state: PhantomData,
        }
    }
}

impl<U> KeycloakAdminBuilder<U, NoCredentials> {
    /// Supplies the credentials to authenticate with.
    ///
    /// Takes anything convertible into [`Credentials`], so both
    /// [`ClientCredentialsConfig`](crate::ClientCredentialsConfig) and
    /// [`BearerCredentialsConfig`](crate::BearerCredentialsConfig) work
    /// directly.
    pub fn credentials(
        self,
        credentials: impl Into<Credentials>,
    ) -> KeycloakAdminBuilder<U, HasCredentials> {
        KeycloakAdminBuilder {
            url: self.url,
            realm: self.realm,
            credentials: Some(credentials.into()),
            tls_config: self.tls_config,
            timeout: self.timeout,
            _url_state: PhantomData,
            _credentials_state: PhantomData,
        }
    }
}

impl<U, C> KeycloakAdminBuilder<U, C> {
    /// Sets the realm whose resources this client administers.
    ///
    /// Both the admin endpoints and the token endpoint are scoped to this
    /// realm.
    #[must_use]
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Applies custom TLS trust settings, e.g. a private CA.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Accepts any certificate and allows plain-HTTP URLs.
    ///
    /// **WARNING**: for local development against a throwaway server only.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }

    /// Caps how long each HTTP request may take, token exchange included.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl KeycloakAdminBuilder<HasUrl, HasCredentials> {
    /// Builds a client on top of an injected transport.
    ///
    /// Lets unit tests bypass the HTTP stack entirely.
    #[cfg(test)]
    pub fn build_with_transport(
        self,
        transport: Arc<dyn crate::transport::AdminTransport>,
    ) -> KeycloakAdmin {
        KeycloakAdmin::from_inner(super::inner::ClientInner::new(transport))
    }

    /// Assembles the client.
    ///
    /// Validates the configuration and constructs the HTTP transport. No
    /// request is sent yet; the first operation triggers the token
    /// exchange when client credentials are used.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL does not parse
    /// - The URL is HTTP without [`insecure()`](Self::insecure)
    /// - No realm was configured
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let admin = KeycloakAdmin::builder()
    ///     .url("https://id.example.com")
    ///     .realm("master")
    ///     .credentials(credentials)
    ///     .build()
    ///     .await?;
    /// ```
    #[cfg(feature = "rest")]
    pub async fn build(self) -> Result<KeycloakAdmin, Error> {
        let url = self
            .url
            .ok_or_else(|| Error::configuration("URL is required"))?;

        let parsed_url = url::Url::parse(&url)
            .map_err(|e| Error::configuration(format!("invalid URL: {e}")))?;

        // Plain HTTP must be opted into explicitly.
        if parsed_url.scheme() != "https" && !self.tls_config.skip_verification {
            return Err(Error::configuration(
                "HTTPS is required; call .insecure() to allow plain HTTP during development",
            ));
        }

        let realm = self
            .realm
            .ok_or_else(|| Error::configuration("Realm is required"))?;

        let credentials = self
            .credentials
            .ok_or_else(|| Error::configuration("credentials are required"))?;

        let timeout = self.timeout.unwrap_or(Duration::from_secs(30));

        let transport = RestTransport::new(
            parsed_url,
            &realm,
            credentials,
            &self.tls_config,
            timeout,
        )?;

        Ok(KeycloakAdmin::from_inner(ClientInner::new(Arc::new(
            transport,
        ))))
    }

    /// Assembles the client.
    ///
    /// Without the `rest` feature there is no transport to construct, so
    /// building always fails.
    #[cfg(not(feature = "rest"))]
    pub async fn build(self) -> Result<KeycloakAdmin, Error> {
        Err(Error::configuration(
            "the 'rest' feature is required to build a client",
        ))
    }
}
