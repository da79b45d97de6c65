//! Shared configuration for usmctl.
//!
//! TOML profiles, credential resolution (flag, env, keyring, plaintext),
//! and translation to `usm_core::ControlPlaneConfig`. Core never sees these
//! types; the CLI maps its global flags onto [`Overrides`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use usm_core::{ApiVersion, ControlPlaneConfig, ProvisionTiming, TlsVerification};

/// Keyring service name; entries are keyed `{profile}/password`.
pub const KEYRING_SERVICE: &str = "usmctl";

// Variables shared with the AlienVault Terraform provider.
pub const ENV_HOST: &str = "ALIENVAULT_FQDN";
pub const ENV_USERNAME: &str = "ALIENVAULT_USERNAME";
pub const ENV_PASSWORD: &str = "ALIENVAULT_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' is not defined in {}", .path.display())]
    UnknownProfile { name: String, path: PathBuf },

    #[error("no control-plane host configured for profile '{profile}'")]
    NoHost { profile: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named tenant profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Overall budget for `sensors provision`, in seconds.
    #[serde(default = "default_provision_timeout")]
    pub provision_timeout: u64,

    #[serde(default = "default_api_version")]
    pub api_version: u8,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            provision_timeout: default_provision_timeout(),
            api_version: default_api_version(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_provision_timeout() -> u64 {
    3600
}
fn default_api_version() -> u8 {
    1
}

/// A named tenant profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Tenant host (`tenant.alienvault.cloud`) or full URL.
    #[serde(default)]
    pub host: Option<String>,

    pub username: Option<String>,

    /// Plaintext password. Prefer the keyring or `password_env`.
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,

    pub api_version: Option<u8>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,
}

/// Values that win over the profile, typically from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub api_version: Option<u8>,
    pub insecure: bool,
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "usmctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("usmctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` plus `USM_*` environment overrides.
///
/// Nested keys use a double underscore: `USM_DEFAULTS__OUTPUT=json`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("USM_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile selection ───────────────────────────────────────────────

impl Config {
    /// The profile name in effect: explicit choice, then `default_profile`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a profile.
    ///
    /// An explicitly requested profile must exist. The implicit default may
    /// be absent, in which case an empty profile is returned and everything
    /// comes from overrides and the environment.
    pub fn select_profile(&self, requested: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = self.active_profile_name(requested);
        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile.clone())),
            None if requested.is_some() => Err(ConfigError::UnknownProfile {
                name,
                path: config_path(),
            }),
            None => Ok((name, Profile::default())),
        }
    }
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `ControlPlaneConfig` from a profile plus overrides.
///
/// This is the single boundary where config types cross into core types.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    overrides: &Overrides,
) -> Result<ControlPlaneConfig, ConfigError> {
    // 1. Host (override > profile > env)
    let host = overrides
        .host
        .clone()
        .or_else(|| profile.host.clone())
        .or_else(|| std::env::var(ENV_HOST).ok())
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| ConfigError::NoHost {
            profile: profile_name.into(),
        })?;
    let url = parse_host(&host)?;

    // 2. Credentials
    let username = resolve_username(profile, profile_name, overrides)?;
    let password = resolve_password(profile, profile_name, overrides)?;

    // 3. API version
    let version = overrides
        .api_version
        .or(profile.api_version)
        .unwrap_or(defaults.api_version);
    let api_version = ApiVersion::try_from(version).map_err(|_| ConfigError::Validation {
        field: "api_version".into(),
        reason: format!("expected 1 or 2, got {version}"),
    })?;

    // 4. TLS verification
    let tls = if overrides.insecure || profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 5. Timeout
    let timeout = Duration::from_secs(
        overrides
            .timeout
            .or(profile.timeout)
            .unwrap_or(defaults.timeout),
    );

    Ok(ControlPlaneConfig {
        url,
        api_version,
        username,
        password,
        tls,
        timeout,
        provisioning: ProvisionTiming::default(),
    })
}

/// Accept a bare host (`https://` is implied) or a full URL.
pub fn parse_host(host: &str) -> Result<Url, ConfigError> {
    let host = host.trim();
    let candidate = if host.contains("://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    };
    let url = Url::parse(&candidate).map_err(|e| ConfigError::Validation {
        field: "host".into(),
        reason: format!("{host}: {e}"),
    })?;
    if url.host_str().is_none() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("{host}: missing host name"),
        });
    }
    Ok(url)
}

// ── Credential helpers ──────────────────────────────────────────────

fn resolve_username(
    profile: &Profile,
    profile_name: &str,
    overrides: &Overrides,
) -> Result<String, ConfigError> {
    overrides
        .username
        .clone()
        .or_else(|| profile.username.clone())
        .or_else(|| std::env::var(ENV_USERNAME).ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the password from the credential chain.
pub fn resolve_password(
    profile: &Profile,
    profile_name: &str,
    overrides: &Overrides,
) -> Result<SecretString, ConfigError> {
    // 1. Flag (itself sourced from USM_PASSWORD)
    if let Some(ref pw) = overrides.password {
        return Ok(pw.clone());
    }

    // 2. Profile's password_env, then the provider variable
    let env_names = profile.password_env.iter().map(String::as_str).chain([ENV_PASSWORD]);
    for name in env_names {
        if let Ok(pw) = std::env::var(name) {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}
