// ── Input validation ──
//
// Checks applied to user input before it reaches the control plane.
// Each validator returns the parsed value so callers never re-parse.

use std::net::IpAddr;

use crate::error::CoreError;
use crate::model::SourceFormat;
use crate::plugins::PLUGINS;

/// Parse an appliance address. Accepts any IPv4 or IPv6 literal.
pub fn validate_ip(raw: &str) -> Result<IpAddr, CoreError> {
    raw.parse()
        .map_err(|_| CoreError::validation(format!("must be a valid IP, got: {raw:?}")))
}

pub fn validate_source_format(raw: &str) -> Result<SourceFormat, CoreError> {
    raw.parse().map_err(|_| {
        CoreError::validation(format!(
            "source format must be either \"raw\" or \"syslog\", got: {raw:?}"
        ))
    })
}

/// Check a plugin name against the supported list (exact, case-sensitive).
pub fn validate_plugin(name: &str) -> Result<&'static str, CoreError> {
    PLUGINS
        .iter()
        .copied()
        .find(|plugin| *plugin == name)
        .ok_or_else(|| CoreError::validation(format!("plugin {name:?} is not supported")))
}
