// ── Sensor provisioning ──
//
// Brings an appliance from "powered on at an IP address" to "registered,
// set up and Ready" across two APIs: the authenticated control plane and the
// appliance's anonymous local API.
//
// ```text
//   Idle ──► KeyAcquired ──► ApplianceReachable ──► ApplianceActivated
//    │                              ▲                        │
//    └──── (caller-supplied code) ──┘                        ▼
//                                                    SensorRegistered
//                                                            │
//                    Ready ◄── SetupComplete ◄───────────────┘
//
//   any non-terminal state ──► Aborted
// ```
//
// A key minted by the run is revoked exactly once if the run aborts.

use strum::Display;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use usm_api::models::ActivationRequest;
use usm_api::{ApplianceClient, ControlClient};

use crate::capacity::CapacityGuard;
use crate::config::ProvisionTiming;
use crate::deadline::Deadline;
use crate::error::CoreError;
use crate::model::{Sensor, SensorId, SensorKey, SensorSpec};
use crate::ops::{SensorKeySet, SensorSet};

// ── ProvisionState ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ProvisionState {
    Idle,
    KeyAcquired,
    ApplianceReachable,
    ApplianceActivated,
    SensorRegistered,
    SetupComplete,
    Ready,
    Aborted,
}

impl ProvisionState {
    pub const fn can_transition_to(self, to: Self) -> bool {
        use ProvisionState::{
            Aborted, ApplianceActivated, ApplianceReachable, Idle, KeyAcquired, Ready,
            SensorRegistered, SetupComplete,
        };

        matches!(
            (self, to),
            (Idle, KeyAcquired | ApplianceReachable)
                | (KeyAcquired, ApplianceReachable)
                | (ApplianceReachable, ApplianceActivated)
                | (ApplianceActivated, SensorRegistered)
                | (SensorRegistered, SetupComplete)
                | (SetupComplete, Ready)
                | (
                    Idle | KeyAcquired
                        | ApplianceReachable
                        | ApplianceActivated
                        | SensorRegistered
                        | SetupComplete,
                    Aborted
                )
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Aborted)
    }
}

// ── Provisioner ─────────────────────────────────────────────────────

/// One provisioning run. Progress is published on a watch channel.
pub struct Provisioner<'a> {
    client: &'a ControlClient,
    timing: ProvisionTiming,
    state: watch::Sender<ProvisionState>,
}

impl<'a> Provisioner<'a> {
    pub fn new(client: &'a ControlClient, timing: ProvisionTiming) -> Self {
        let (state, _) = watch::channel(ProvisionState::Idle);
        Self {
            client,
            timing,
            state,
        }
    }

    pub fn state(&self) -> ProvisionState {
        *self.state.borrow()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<ProvisionState> {
        self.state.subscribe()
    }

    fn advance(&self, to: ProvisionState) -> Result<(), CoreError> {
        let from = self.state();
        if !from.can_transition_to(to) {
            return Err(CoreError::InvalidState {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        info!(%from, %to, "provisioning state changed");
        self.state.send_replace(to);
        Ok(())
    }

    /// Provision a sensor through `appliance`.
    ///
    /// On success the new sensor's id is returned and also written into
    /// `spec.id`. On failure any key this run minted is revoked before the
    /// original error is returned.
    pub async fn run(
        &self,
        deadline: &Deadline,
        spec: &mut SensorSpec,
        appliance: &ApplianceClient,
    ) -> Result<SensorId, CoreError> {
        let mut minted = None;
        match self.steps(deadline, spec, appliance, &mut minted).await {
            Ok(id) => Ok(id),
            Err(err) => {
                if !self.state().is_terminal() {
                    warn!(state = %self.state(), error = %err, "provisioning aborted");
                    self.state.send_replace(ProvisionState::Aborted);
                }
                if let Some(key) = minted {
                    self.revoke(&key).await;
                }
                Err(err)
            }
        }
    }

    async fn steps(
        &self,
        deadline: &Deadline,
        spec: &mut SensorSpec,
        appliance: &ApplianceClient,
        minted: &mut Option<SensorKey>,
    ) -> Result<SensorId, CoreError> {
        deadline.check()?;
        let sensors = SensorSet::new(self.client);

        let removed = sensors.sweep().await?;
        if !removed.is_empty() {
            info!(count = removed.len(), "removed dead sensors");
        }
        deadline.pause(self.timing.sweep_settle).await?;

        let activation_code = match spec.activation_code.clone() {
            Some(code) => code,
            None => {
                let key = self.acquire_key(deadline).await?;
                let code = key.id.clone();
                *minted = Some(key);
                self.advance(ProvisionState::KeyAcquired)?;
                code
            }
        };

        self.wait_for_appliance(deadline, appliance).await?;
        self.advance(ProvisionState::ApplianceReachable)?;

        let request = ActivationRequest {
            key: activation_code,
            master_node: self.client.host_authority(),
            name: spec.name.clone(),
            description: spec.description.clone(),
        };
        self.activate(deadline, appliance, &request).await?;
        self.advance(ProvisionState::ApplianceActivated)?;

        deadline.pause(self.timing.registration_settle).await?;

        let sensor = find_registered(&sensors, &spec.name).await?;
        spec.id = Some(sensor.id.clone());
        self.advance(ProvisionState::SensorRegistered)?;

        sensors.complete_setup(&sensor.id).await?;
        self.advance(ProvisionState::SetupComplete)?;

        self.wait_until_ready(deadline, &sensors, &sensor.id).await?;
        self.advance(ProvisionState::Ready)?;

        Ok(sensor.id)
    }

    async fn acquire_key(&self, deadline: &Deadline) -> Result<SensorKey, CoreError> {
        deadline.check()?;
        if !CapacityGuard::new(self.client)
            .has_sensor_key_availability()
            .await?
        {
            return Err(CoreError::Capacity {
                message: "license has no room for another sensor key".into(),
            });
        }
        SensorKeySet::new(self.client).create(false).await
    }

    async fn wait_for_appliance(
        &self,
        deadline: &Deadline,
        appliance: &ApplianceClient,
    ) -> Result<(), CoreError> {
        loop {
            match deadline.bound(appliance.status()).await? {
                Ok(probe) if probe.is_awaiting_activation() => return Ok(()),
                Ok(probe) if probe.http_status == 200 && probe.status.is_some() => {
                    return Err(CoreError::ApplianceState {
                        message: format!(
                            "appliance at {} reports status {:?}",
                            appliance.base_url(),
                            probe.status.unwrap_or_default()
                        ),
                    });
                }
                Ok(probe) => debug!(http_status = probe.http_status, "appliance not answering yet"),
                Err(e) => debug!(error = %e, "appliance unreachable"),
            }
            deadline.pause(self.timing.liveness_interval).await?;
        }
    }

    async fn activate(
        &self,
        deadline: &Deadline,
        appliance: &ApplianceClient,
        request: &ActivationRequest,
    ) -> Result<(), CoreError> {
        loop {
            match deadline.bound(appliance.activate(request)).await? {
                Ok(200) => return Ok(()),
                Ok(status) => debug!(status, "activation not accepted yet"),
                Err(e) => debug!(error = %e, "activation request failed"),
            }
            deadline.pause(self.timing.activation_interval).await?;
        }
    }

    async fn wait_until_ready(
        &self,
        deadline: &Deadline,
        sensors: &SensorSet<'_>,
        id: &SensorId,
    ) -> Result<(), CoreError> {
        loop {
            let sensor = sensors.get(id).await?;
            if sensor.is_ready() {
                return Ok(());
            }
            debug!(%id, status = %sensor.status, "waiting for sensor to become ready");
            deadline.pause(self.timing.ready_interval).await?;
        }
    }

    async fn revoke(&self, key: &SensorKey) {
        match SensorKeySet::new(self.client).delete(key).await {
            Ok(()) => info!(id = %key.id, "revoked unused sensor key"),
            Err(e) => warn!(id = %key.id, error = %e, "failed to revoke sensor key"),
        }
    }
}

/// The single sensor named `name` that is still awaiting setup.
///
/// Names are the only correlation between an appliance and its
/// registration, so more than one candidate is an error rather than a guess.
async fn find_registered(sensors: &SensorSet<'_>, name: &str) -> Result<Sensor, CoreError> {
    let mut candidates: Vec<Sensor> = sensors
        .list()
        .await?
        .into_iter()
        .filter(|sensor| !sensor.is_setup_complete() && sensor.name == name)
        .collect();

    if candidates.len() > 1 {
        return Err(CoreError::AmbiguousResult {
            message: format!(
                "{} sensors named {name:?} are awaiting setup",
                candidates.len()
            ),
        });
    }
    candidates
        .pop()
        .ok_or_else(|| CoreError::not_found("sensor awaiting setup named", name))
}
