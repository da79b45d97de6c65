use chrono::{DateTime, Utc};
use serde::Serialize;

/// Single-use activation code for binding an appliance to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorKey {
    /// The key id doubles as the activation code.
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Node that consumed the key, if any.
    pub node_id: Option<String>,
}

impl SensorKey {
    pub fn is_consumed(&self) -> bool {
        self.node_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
