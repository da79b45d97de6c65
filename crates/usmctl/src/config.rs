//! Glue between global flags and usm-config.
//!
//! Core never sees these types -- it receives a pre-built `ControlPlaneConfig`.

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use usm_config::{Config, Overrides};
use usm_core::ControlPlaneConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub fn overrides(global: &GlobalOpts) -> Overrides {
    Overrides {
        host: global.host.clone(),
        username: global.username.clone(),
        password: global.password.clone().map(SecretString::from),
        api_version: global.api_version,
        insecure: global.insecure,
        timeout: global.timeout,
    }
}

/// Fill flags the user left unset from the config file's `[defaults]`.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }
}

/// Build a `ControlPlaneConfig` from the config file, profile and flags.
pub fn build_control_plane_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<ControlPlaneConfig, CliError> {
    let (name, profile) = cfg.select_profile(global.profile.as_deref())?;
    tracing::debug!(profile = %name, "resolving control-plane config");
    Ok(usm_config::resolve_profile(
        &profile,
        &name,
        &cfg.defaults,
        &overrides(global),
    )?)
}

/// Provisioning budget: flag, then `[defaults] provision_timeout`.
pub fn provision_deadline(flag: Option<u64>, cfg: &Config) -> Duration {
    Duration::from_secs(flag.unwrap_or(cfg.defaults.provision_timeout))
}
