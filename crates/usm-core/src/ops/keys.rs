// ── Sensor key operations ──

use tracing::debug;
use usm_api::ControlClient;

use crate::error::CoreError;
use crate::model::SensorKey;

pub struct SensorKeySet<'a> {
    client: &'a ControlClient,
}

impl<'a> SensorKeySet<'a> {
    pub fn new(client: &'a ControlClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<SensorKey>, CoreError> {
        let records = self.client.list_sensor_keys().await?;
        Ok(records.into_iter().map(SensorKey::from).collect())
    }

    /// Keys not yet bound to a node.
    pub async fn list_unconsumed(&self) -> Result<Vec<SensorKey>, CoreError> {
        let mut keys = self.list().await?;
        keys.retain(|key| !key.is_consumed());
        Ok(keys)
    }

    pub async fn get(&self, id: &str) -> Result<SensorKey, CoreError> {
        self.list()
            .await?
            .into_iter()
            .find(|key| key.id == id)
            .ok_or_else(|| CoreError::not_found("sensor key", id))
    }

    /// Obtain a key. With `reuse`, an existing unconsumed key is returned
    /// when one exists instead of minting a new one.
    pub async fn create(&self, reuse: bool) -> Result<SensorKey, CoreError> {
        if reuse {
            if let Some(key) = self.list_unconsumed().await?.into_iter().next() {
                debug!(id = %key.id, "reusing unconsumed sensor key");
                return Ok(key);
            }
        }

        let key = SensorKey::from(self.client.create_sensor_key().await?);
        debug!(id = %key.id, "sensor key created");
        Ok(key)
    }

    pub async fn delete(&self, key: &SensorKey) -> Result<(), CoreError> {
        self.client.delete_sensor_key(&key.id).await?;
        Ok(())
    }
}
