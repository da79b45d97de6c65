// HTTP client construction.
//
// The session client and the appliance client share TLS and timeout
// settings through this module. Only the session client carries a cookie jar.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use url::{Host, Url};

use crate::error::Error;

const USER_AGENT: &str = concat!("usmctl/", env!("CARGO_PKG_VERSION"));

/// How server certificates are verified.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Platform trust roots.
    #[default]
    System,
    /// Trust a single PEM-encoded CA in addition to the platform roots.
    CustomCa(PathBuf),
    /// Accept any certificate. Only for explicit opt-in or loopback targets.
    DangerAcceptInvalid,
}

/// Timeout, TLS and cookie settings for one `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build the client. A custom CA that cannot be read or parsed is an error.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(ref jar) = self.cookie_jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Attach an empty cookie jar.
    pub fn with_cookie_jar(mut self) -> Self {
        self.cookie_jar = Some(Arc::new(Jar::default()));
        self
    }

    /// Relax verification for loopback targets, which never present a
    /// certificate for a public name.
    pub fn for_target(mut self, url: &Url) -> Self {
        if is_loopback(url) {
            self.tls = TlsMode::DangerAcceptInvalid;
        }
        self
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
        Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_targets_skip_verification() {
        let url = Url::parse("https://127.0.0.1:8443").unwrap();
        let cfg = TransportConfig::default().for_target(&url);
        assert!(matches!(cfg.tls, TlsMode::DangerAcceptInvalid));

        let url = Url::parse("https://[::1]/").unwrap();
        let cfg = TransportConfig::default().for_target(&url);
        assert!(matches!(cfg.tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn remote_targets_keep_configured_mode() {
        let url = Url::parse("https://tenant.alienvault.cloud").unwrap();
        let cfg = TransportConfig::default().for_target(&url);
        assert!(matches!(cfg.tls, TlsMode::System));

        let url = Url::parse("https://10.0.0.5").unwrap();
        let cfg = TransportConfig::default().for_target(&url);
        assert!(matches!(cfg.tls, TlsMode::System));
    }
}
