// ── Runtime connection configuration ──
//
// These types describe how to reach a control plane and how patiently to
// provision sensors. They carry credential data but never touch disk; the
// CLI builds a `ControlPlaneConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use usm_api::ApiVersion;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Loopback hosts get this automatically.
    DangerAcceptInvalid,
}

/// Poll intervals and settle pauses used by sensor provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionTiming {
    /// Pause after the dead-sensor sweep.
    pub sweep_settle: Duration,
    /// Interval between appliance liveness probes.
    pub liveness_interval: Duration,
    /// Interval between activation attempts.
    pub activation_interval: Duration,
    /// Pause between activation and the registration lookup.
    pub registration_settle: Duration,
    /// Interval between readiness checks on the registered sensor.
    pub ready_interval: Duration,
}

impl Default for ProvisionTiming {
    fn default() -> Self {
        Self {
            sweep_settle: Duration::from_secs(5),
            liveness_interval: Duration::from_secs(10),
            activation_interval: Duration::from_secs(30),
            registration_settle: Duration::from_secs(10),
            ready_interval: Duration::from_secs(30),
        }
    }
}

impl ProvisionTiming {
    /// Every interval and pause set to `step`. Handy for tests.
    pub fn uniform(step: Duration) -> Self {
        Self {
            sweep_settle: step,
            liveness_interval: step,
            activation_interval: step,
            registration_settle: step,
            ready_interval: step,
        }
    }
}

/// Configuration for one control-plane tenant.
#[derive(Debug, Clone)]
pub struct ControlPlaneConfig {
    /// Control-plane root, e.g. `https://tenant.alienvault.cloud`.
    pub url: Url,
    pub api_version: ApiVersion,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    pub provisioning: ProvisionTiming,
}

impl ControlPlaneConfig {
    /// Config for `https://{host}` with default TLS, timeout and timing.
    pub fn for_host(
        host: &str,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(&format!("https://{host}"))?,
            api_version: ApiVersion::default(),
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            provisioning: ProvisionTiming::default(),
        })
    }
}
