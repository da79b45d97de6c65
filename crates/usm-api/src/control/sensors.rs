// Sensor endpoints
//
// The list shape depends on the API version: v1 answers with a bare array,
// v2 with `{"_embedded": {"sensors": [...]}}`.

use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::auth::ApiVersion;
use crate::control::client::ControlClient;
use crate::control::models::{
    EmbeddedSensors, SensorDetailsPatch, SensorRecord, SetupStatusPatch,
};
use crate::error::Error;

impl ControlClient {
    /// List every registered sensor.
    ///
    /// `GET /sensors`
    pub async fn list_sensors(&self) -> Result<Vec<SensorRecord>, Error> {
        match self.version() {
            ApiVersion::V1 => self.get("sensors", "list sensors").await,
            ApiVersion::V2 => {
                let wrapped: EmbeddedSensors = self.get("sensors", "list sensors").await?;
                Ok(wrapped.embedded.sensors)
            }
        }
    }

    /// Set a sensor's setup status. Only HTTP 200 counts as success.
    ///
    /// `PATCH /sensors/{id}` with `{"setupStatus": "..."}`
    pub async fn patch_sensor_setup_status(&self, id: &str, status: &str) -> Result<(), Error> {
        debug!(id, status, "updating sensor setup status");
        self.send_expect(
            Method::PATCH,
            &format!("sensors/{id}"),
            Some(&SetupStatusPatch {
                setup_status: status,
            }),
            StatusCode::OK,
            "update sensor setup status",
        )
        .await
    }

    /// Rename a sensor. Only HTTP 200 counts as success.
    ///
    /// `PATCH /sensors/{id}` with `{"name": "...", "description": "..."}`
    pub async fn patch_sensor_details(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), Error> {
        debug!(id, name, "updating sensor");
        self.send_expect(
            Method::PATCH,
            &format!("sensors/{id}"),
            Some(&SensorDetailsPatch { name, description }),
            StatusCode::OK,
            "update sensor",
        )
        .await
    }

    /// Deregister a sensor. Only HTTP 200 counts as success.
    ///
    /// `DELETE /sensors/{id}`
    pub async fn delete_sensor(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting sensor");
        self.send_expect(
            Method::DELETE,
            &format!("sensors/{id}"),
            None::<&()>,
            StatusCode::OK,
            "delete sensor",
        )
        .await
    }
}
