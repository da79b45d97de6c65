// ── Scheduler job domain types ──
//
// A job is a shared `JobCore` plus a kind-specific parameter block. The kind
// is identified on the wire only by its fixed action tag, so each parameter
// type declares the tags it stamps onto the core before every write.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};

// ── Tag vocabularies ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum JobApplication {
    #[strum(serialize = "amazon-aws")]
    AmazonAws,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum JobAction {
    #[strum(serialize = "s3TrackFiles")]
    MonitorBucket,
    #[strum(serialize = "cloudWatchTrackFiles")]
    MonitorCloudWatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum JobType {
    #[strum(serialize = "collection")]
    Collection,
}

/// How collected log lines are framed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceFormat {
    #[default]
    Raw,
    Syslog,
}

/// The derived tag set a job kind forces onto every job it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobTags {
    pub app: JobApplication,
    pub action: JobAction,
    pub job_type: JobType,
    pub custom: bool,
}

// ── JobCore ─────────────────────────────────────────────────────────

/// Fields every scheduler job carries, whatever its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobCore {
    /// Server-assigned identifier. Empty until created.
    pub id: Option<String>,
    /// Sensor that runs the job.
    pub sensor: String,
    /// Schedule in control-plane syntax (see [`crate::schedule`]).
    pub schedule: String,
    pub name: String,
    pub description: String,
    pub disabled: bool,

    // Derived tags. Stamped by typed job sets, caller-controlled for generic jobs.
    pub app: String,
    pub action: String,
    pub job_type: String,
    pub custom: bool,

    // Read-only, maintained by the server.
    pub running: bool,
    pub last_run: Option<i64>,
    pub next_run: Option<i64>,
}

impl JobCore {
    /// The identifier, if a non-empty one is set.
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Overwrite the derived tags with a kind's fixed values.
    pub fn stamp(&mut self, tags: &JobTags) {
        self.app = tags.app.as_ref().to_owned();
        self.action = tags.action.as_ref().to_owned();
        self.job_type = tags.job_type.as_ref().to_owned();
        self.custom = tags.custom;
    }
}

// ── Job kinds ───────────────────────────────────────────────────────

/// A kind-specific parameter block.
pub trait JobParams: Serialize + DeserializeOwned + Send + Sync {
    /// Human name used in error messages.
    const KIND: &'static str;
    /// Tags stamped on write and used to filter the shared collection.
    /// `None` leaves tags to the caller and disables filtering.
    const TAGS: Option<JobTags>;
}

/// A scheduler job of kind `P`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Job<P> {
    #[serde(flatten)]
    pub core: JobCore,
    pub params: P,
}

impl<P> Job<P> {
    pub fn new(core: JobCore, params: P) -> Self {
        Self { core, params }
    }
}

/// Collect log files from an S3 bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketParams {
    #[serde(default, rename = "bucketName")]
    pub bucket_name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, rename = "source")]
    pub source_format: SourceFormat,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plugin: String,
}

impl JobParams for BucketParams {
    const KIND: &'static str = "bucket job";
    const TAGS: Option<JobTags> = Some(JobTags {
        app: JobApplication::AmazonAws,
        action: JobAction::MonitorBucket,
        job_type: JobType::Collection,
        custom: true,
    });
}

/// Collect log events from a CloudWatch log stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudWatchParams {
    #[serde(default, rename = "regionName")]
    pub region: String,
    #[serde(default, rename = "groupName")]
    pub group: String,
    #[serde(default, rename = "streamName")]
    pub stream: String,
    #[serde(default, rename = "source")]
    pub source_format: SourceFormat,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plugin: String,
}

impl JobParams for CloudWatchParams {
    const KIND: &'static str = "cloudwatch job";
    const TAGS: Option<JobTags> = Some(JobTags {
        app: JobApplication::AmazonAws,
        action: JobAction::MonitorCloudWatch,
        job_type: JobType::Collection,
        custom: true,
    });
}

/// Any job, with its parameters left as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenericParams(pub Map<String, Value>);

impl JobParams for GenericParams {
    const KIND: &'static str = "job";
    const TAGS: Option<JobTags> = None;
}

pub type BucketJob = Job<BucketParams>;
pub type CloudWatchJob = Job<CloudWatchParams>;
pub type GenericJob = Job<GenericParams>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_overwrites_caller_tags() {
        let mut core = JobCore {
            app: "custom-app".into(),
            action: "cloudWatchTrackFiles".into(),
            job_type: "other".into(),
            custom: false,
            ..JobCore::default()
        };
        let tags = BucketParams::TAGS.unwrap();
        core.stamp(&tags);
        assert_eq!(core.app, "amazon-aws");
        assert_eq!(core.action, "s3TrackFiles");
        assert_eq!(core.job_type, "collection");
        assert!(core.custom);
    }

    #[test]
    fn empty_identifier_counts_as_absent() {
        let core = JobCore {
            id: Some(String::new()),
            ..JobCore::default()
        };
        assert_eq!(core.identifier(), None);
    }

    #[test]
    fn source_format_parses_lowercase() {
        assert_eq!("syslog".parse::<SourceFormat>().unwrap(), SourceFormat::Syslog);
        assert_eq!(SourceFormat::Raw.to_string(), "raw");
        assert!("json".parse::<SourceFormat>().is_err());
    }
}
