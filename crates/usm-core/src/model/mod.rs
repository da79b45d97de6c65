// ── Domain model ──
//
// Wire-independent entity types. `crate::convert` maps records from
// `usm_api::models` into these.

pub mod job;
pub mod key;
pub mod license;
pub mod sensor;

pub use job::{
    BucketJob, BucketParams, CloudWatchJob, CloudWatchParams, GenericJob, GenericParams, Job,
    JobAction, JobApplication, JobCore, JobParams, JobTags, JobType, SourceFormat,
};
pub use key::SensorKey;
pub use license::License;
pub use sensor::{Sensor, SensorId, SensorSpec, SensorStatus, SetupStatus};
