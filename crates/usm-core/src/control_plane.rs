// ── ControlPlane facade ──
//
// Owns the session client and hands out the operation sets. Everything but
// (re-)authentication borrows `&self`, so independent operations may run
// concurrently against one session.

use std::net::IpAddr;

use tracing::info;
use usm_api::{ApiVersion, ApplianceClient, ControlClient, Credentials, TlsMode, TransportConfig};

use crate::capacity::CapacityGuard;
use crate::config::{ControlPlaneConfig, ProvisionTiming, TlsVerification};
use crate::deadline::Deadline;
use crate::error::CoreError;
use crate::model::{JobParams, License, SensorId, SensorSpec};
use crate::ops::{JobSet, SensorKeySet, SensorSet};
use crate::provision::Provisioner;

pub struct ControlPlane {
    client: ControlClient,
    timing: ProvisionTiming,
}

impl ControlPlane {
    /// Build an unauthenticated facade. Call [`authenticate`](Self::authenticate)
    /// before anything else, or use [`connect`](Self::connect).
    pub fn new(config: ControlPlaneConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let credentials = Credentials::new(config.username, config.password);
        let client = ControlClient::new(config.url, config.api_version, credentials, transport)?;
        Ok(Self {
            client,
            timing: config.provisioning,
        })
    }

    /// Build and authenticate in one step.
    pub async fn connect(config: ControlPlaneConfig) -> Result<Self, CoreError> {
        let mut plane = Self::new(config)?;
        plane.authenticate().await?;
        Ok(plane)
    }

    /// Start a fresh session. Exclusive borrow: no request can be in flight.
    pub async fn authenticate(&mut self) -> Result<(), CoreError> {
        self.client.authenticate().await?;
        info!(
            host = %self.client.host_authority(),
            version = %self.client.version(),
            "authenticated"
        );
        Ok(())
    }

    pub fn client(&self) -> &ControlClient {
        &self.client
    }

    pub fn api_version(&self) -> ApiVersion {
        self.client.version()
    }

    // ── Operation sets ───────────────────────────────────────────

    pub fn jobs<P: JobParams>(&self) -> JobSet<'_, P> {
        JobSet::new(&self.client)
    }

    pub fn sensors(&self) -> SensorSet<'_> {
        SensorSet::new(&self.client)
    }

    pub fn sensor_keys(&self) -> SensorKeySet<'_> {
        SensorKeySet::new(&self.client)
    }

    pub fn capacity(&self) -> CapacityGuard<'_> {
        CapacityGuard::new(&self.client)
    }

    pub async fn license(&self) -> Result<License, CoreError> {
        self.capacity().license().await
    }

    // ── Provisioning ─────────────────────────────────────────────

    /// A provisioner using this plane's timing, for callers that want to
    /// watch progress.
    pub fn provisioner(&self) -> Provisioner<'_> {
        Provisioner::new(&self.client, self.timing.clone())
    }

    /// Provision a sensor through the appliance at `ip`.
    pub async fn create_sensor_via_appliance(
        &self,
        deadline: &Deadline,
        spec: &mut SensorSpec,
        ip: IpAddr,
    ) -> Result<SensorId, CoreError> {
        let appliance = ApplianceClient::for_ip(ip)?;
        self.provision_via(deadline, spec, &appliance).await
    }

    /// Provision through an explicit appliance endpoint.
    pub async fn provision_via(
        &self,
        deadline: &Deadline,
        spec: &mut SensorSpec,
        appliance: &ApplianceClient,
    ) -> Result<SensorId, CoreError> {
        self.provisioner().run(deadline, spec, appliance).await
    }
}

fn build_transport(config: &ControlPlaneConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: config.timeout,
        cookie_jar: None,
    }
}
