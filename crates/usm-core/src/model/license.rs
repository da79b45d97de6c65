use chrono::{DateTime, Utc};
use serde::Serialize;

/// Account license limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub control_node_limit: u32,
    /// Maximum sensors, counting unconsumed keys as future sensors.
    pub sensor_node_limit: u32,
    pub monthly_storage_kb: i64,
    pub expires_at: DateTime<Utc>,
}

impl License {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
