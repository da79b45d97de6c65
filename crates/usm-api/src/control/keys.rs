// Sensor key endpoints

use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::control::client::ControlClient;
use crate::control::models::SensorKeyRecord;
use crate::error::Error;

impl ControlClient {
    /// List every activation key on the account, consumed or not.
    ///
    /// `GET /sensors/key`
    pub async fn list_sensor_keys(&self) -> Result<Vec<SensorKeyRecord>, Error> {
        self.get("sensors/key", "list sensor keys").await
    }

    /// Mint a new activation key.
    ///
    /// `POST /sensors/key` with an empty body
    pub async fn create_sensor_key(&self) -> Result<SensorKeyRecord, Error> {
        debug!("creating sensor key");
        self.send_json(Method::POST, "sensors/key", None::<&()>, "create sensor key")
            .await
    }

    /// Revoke an activation key. Only HTTP 204 counts as success.
    ///
    /// `DELETE /sensors/key/{id}`
    pub async fn delete_sensor_key(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting sensor key");
        self.send_expect(
            Method::DELETE,
            &format!("sensors/key/{id}"),
            None::<&()>,
            StatusCode::NO_CONTENT,
            "delete sensor key",
        )
        .await
    }
}
