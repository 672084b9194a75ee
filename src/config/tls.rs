//! TLS settings for connections to the Keycloak server.

use std::path::PathBuf;

/// TLS trust settings for the HTTPS connection to the server.
///
/// Out of the box the transport trusts the system root store, which covers
/// Keycloak deployments behind a public certificate. Deployments signed by a
/// private CA need that CA added as a trust anchor, either from a file on
/// disk or as an in-memory PEM bundle.
///
/// ## Example: private CA
///
/// ```rust
/// use keycloak_admin::TlsConfig;
///
/// let tls = TlsConfig::builder()
///     .ca_cert_file("/etc/keycloak/tls/ca.pem")
///     .build();
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// File holding the CA certificate to trust, in PEM form.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// CA certificate to trust, as PEM data already in memory.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Skip server certificate verification entirely.
    ///
    /// **WARNING**: accepts any certificate. Reserve this for throwaway
    /// local instances, never for a reachable deployment.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// A config that trusts any certificate.
    ///
    /// **WARNING**: this disables the protection TLS exists to provide.
    /// Meant for a dev-mode Keycloak with a self-signed certificate.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if an extra trust anchor is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }
}
