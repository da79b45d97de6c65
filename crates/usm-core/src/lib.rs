// usm-core: Domain layer between usm-api and consumers (CLI).

pub mod capacity;
pub mod config;
pub mod control_plane;
pub mod convert;
pub mod deadline;
pub mod error;
pub mod model;
pub mod ops;
pub mod plugins;
pub mod provision;
pub mod schedule;
pub mod validation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use capacity::{CapacityGuard, sensor_slots_available};
pub use config::{ControlPlaneConfig, ProvisionTiming, TlsVerification};
pub use control_plane::ControlPlane;
pub use deadline::Deadline;
pub use error::CoreError;
pub use ops::{JobSet, SensorKeySet, SensorSet};
pub use provision::{ProvisionState, Provisioner};

pub use model::{
    BucketJob, BucketParams, CloudWatchJob, CloudWatchParams, GenericJob, GenericParams, Job,
    JobAction, JobApplication, JobCore, JobParams, JobTags, JobType, License, Sensor, SensorId,
    SensorKey, SensorSpec, SensorStatus, SetupStatus, SourceFormat,
};

// Callers building configs or appliance clients need these without a
// direct usm-api dependency.
pub use usm_api::{ApiVersion, ApplianceClient, mask_secret};
