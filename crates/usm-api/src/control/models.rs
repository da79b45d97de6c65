// Control-plane wire types
//
// Field names mirror the JSON the control plane emits. Every field a server
// may omit carries `#[serde(default)]` so partial responses still decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Jobs ─────────────────────────────────────────────────────────────

/// A scheduler job as stored in the shared `/scheduler` collection.
///
/// `params` stays untyped here; the core crate decodes it per job kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub sensor: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub action: String,
    #[serde(default, rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Map::is_empty"
    )]
    pub params: Map<String, Value>,

    // Server-maintained, never sent back.
    #[serde(default, skip_serializing)]
    pub running: bool,
    #[serde(default, skip_serializing)]
    pub last_run: Option<i64>,
    #[serde(default, skip_serializing)]
    pub next_run: Option<i64>,
}

/// Built-in jobs may carry `"params": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Sensors ──────────────────────────────────────────────────────────

/// A sensor as listed by `/sensors`.
///
/// API v1 identifies sensors by `uuid`, v2 by `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "activation_code")]
    pub activation_code: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub setup_status: String,
}

impl SensorRecord {
    /// The sensor's identifier, whichever field the API version filled.
    pub fn identifier(&self) -> Option<&str> {
        [self.uuid.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
    }
}

/// API v2 wraps sensor lists in a HAL-style envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddedSensors {
    #[serde(rename = "_embedded")]
    pub embedded: SensorList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SensorList {
    #[serde(default)]
    pub sensors: Vec<SensorRecord>,
}

/// `PATCH /sensors/{id}` body marking setup as finished.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatusPatch<'a> {
    pub setup_status: &'a str,
}

/// `PATCH /sensors/{id}` body renaming a sensor.
#[derive(Debug, Clone, Serialize)]
pub struct SensorDetailsPatch<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

// ── Sensor keys ──────────────────────────────────────────────────────

/// A single-use activation code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorKeyRecord {
    pub id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, rename = "expires")]
    pub expires_at: i64,
    #[serde(default)]
    pub node_id: Option<String>,
}

// ── License ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    #[serde(default, rename = "controlNodesAllowed")]
    pub control_nodes_allowed: u32,
    #[serde(default, rename = "sensorNodesAllowed")]
    pub sensor_nodes_allowed: u32,
    #[serde(default, rename = "monthlyKBStorage")]
    pub monthly_kb_storage: i64,
    #[serde(default)]
    pub expiration: i64,
}

// ── Appliance ────────────────────────────────────────────────────────

/// `POST /api/1.0/connect` body sent to an unregistered appliance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    pub key: String,
    pub master_node: String,
    pub name: String,
    pub description: String,
}

/// `GET /api/1.0/status` response from an appliance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplianceStatus {
    pub status: String,
}
