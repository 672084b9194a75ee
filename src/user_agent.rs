//! The User-Agent string sent with every admin request.

use std::sync::OnceLock;

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// The User-Agent value for outgoing requests, built once and cached.
///
/// Looks like `keycloak-admin-rust/0.1.0 (rust/1.92; linux/x86_64)`: crate
/// name and version, the declared minimum Rust version, and the build
/// target's OS and architecture. Server-side access logs showing this
/// string are what make client-version problems diagnosable after the
/// fact.
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        let os = match std::env::consts::OS {
            // std says "macos"; User-Agent strings conventionally say "darwin"
            "macos" => "darwin",
            os => os,
        };
        format!(
            "keycloak-admin-rust/{} (rust/{}; {}/{})",
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_RUST_VERSION"),
            os,
            std::env::consts::ARCH,
        )
    })
}
