// ── License capacity guard ──
//
// Every check re-fetches its inputs; nothing is cached between calls.
// An unconsumed key counts as a sensor that has not registered yet.

use usm_api::ControlClient;

use crate::error::CoreError;
use crate::model::License;
use crate::ops::{SensorKeySet, SensorSet};

/// `true` when `sensors + pending_keys` leaves room under `limit`.
pub fn sensor_slots_available(sensors: usize, pending_keys: usize, limit: u32) -> bool {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    sensors.saturating_add(pending_keys) < limit
}

pub struct CapacityGuard<'a> {
    client: &'a ControlClient,
}

impl<'a> CapacityGuard<'a> {
    pub fn new(client: &'a ControlClient) -> Self {
        Self { client }
    }

    pub async fn license(&self) -> Result<License, CoreError> {
        Ok(License::from(self.client.get_license().await?))
    }

    /// Room for one more sensor, ignoring outstanding keys.
    pub async fn has_sensor_availability(&self) -> Result<bool, CoreError> {
        let sensors = SensorSet::new(self.client).list().await?;
        let license = self.license().await?;
        Ok(sensor_slots_available(
            sensors.len(),
            0,
            license.sensor_node_limit,
        ))
    }

    /// Room for one more key, counting outstanding keys as sensors.
    pub async fn has_sensor_key_availability(&self) -> Result<bool, CoreError> {
        let sensors = SensorSet::new(self.client).list().await?;
        let keys = SensorKeySet::new(self.client).list_unconsumed().await?;
        let license = self.license().await?;
        Ok(sensor_slots_available(
            sensors.len(),
            keys.len(),
            license.sensor_node_limit,
        ))
    }
}
