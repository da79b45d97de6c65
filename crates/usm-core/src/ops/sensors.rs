// ── Sensor operations ──

use tracing::{debug, warn};
use usm_api::ControlClient;

use crate::error::CoreError;
use crate::model::{Sensor, SensorId, SetupStatus};

pub struct SensorSet<'a> {
    client: &'a ControlClient,
}

impl<'a> SensorSet<'a> {
    pub fn new(client: &'a ControlClient) -> Self {
        Self { client }
    }

    /// Every registered sensor. Records with no identifier are skipped.
    pub async fn list(&self) -> Result<Vec<Sensor>, CoreError> {
        let records = self.client.list_sensors().await?;
        Ok(records
            .into_iter()
            .filter_map(|record| match Sensor::try_from(record) {
                Ok(sensor) => Some(sensor),
                Err(e) => {
                    warn!(error = %e, "skipping sensor record");
                    None
                }
            })
            .collect())
    }

    pub async fn get(&self, id: &SensorId) -> Result<Sensor, CoreError> {
        self.list()
            .await?
            .into_iter()
            .find(|sensor| sensor.id == *id)
            .ok_or_else(|| CoreError::not_found("sensor", id.as_str()))
    }

    /// Fetch a sensor, deregistering it if it has lost its connection.
    pub async fn read_live(&self, id: &SensorId) -> Result<Sensor, CoreError> {
        let sensor = self.get(id).await?;
        if sensor.is_dead() {
            warn!(id = %sensor.id, name = %sensor.name, "sensor lost connection, deregistering");
            self.delete(&sensor).await?;
            return Err(CoreError::Deregistered {
                identifier: sensor.id.to_string(),
            });
        }
        Ok(sensor)
    }

    /// Push the sensor's name and description.
    pub async fn update(&self, sensor: &Sensor) -> Result<(), CoreError> {
        self.client
            .patch_sensor_details(sensor.id.as_str(), &sensor.name, &sensor.description)
            .await?;
        Ok(())
    }

    pub async fn complete_setup(&self, id: &SensorId) -> Result<(), CoreError> {
        self.client
            .patch_sensor_setup_status(id.as_str(), SetupStatus::COMPLETE)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, sensor: &Sensor) -> Result<(), CoreError> {
        self.client.delete_sensor(sensor.id.as_str()).await?;
        Ok(())
    }

    /// Deregister every sensor that has lost its connection.
    ///
    /// Stops at the first failed deletion.
    pub async fn sweep(&self) -> Result<Vec<SensorId>, CoreError> {
        let mut removed = Vec::new();
        for sensor in self.list().await? {
            if sensor.is_dead() {
                debug!(id = %sensor.id, name = %sensor.name, "removing dead sensor");
                self.delete(&sensor).await?;
                removed.push(sensor.id);
            }
        }
        Ok(removed)
    }
}
