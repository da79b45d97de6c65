// ── API-to-domain type conversions ──
//
// Bridges raw `usm_api` records into `usm_core::model` domain types and back.
// The API-version split for sensor identifiers ends here: everything past
// this module sees one `SensorId`.

use chrono::{DateTime, Utc};
use serde_json::Value;

use usm_api::models::{JobRecord, LicenseRecord, SensorKeyRecord, SensorRecord};

use crate::error::CoreError;
use crate::model::{
    Job, JobCore, JobParams, License, Sensor, SensorId, SensorKey, SensorStatus, SetupStatus,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Convert epoch seconds to `DateTime<Utc>`, clamping garbage to the epoch.
fn epoch_to_datetime(epoch: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch, 0).unwrap_or_default()
}

// ── Sensors ────────────────────────────────────────────────────────

impl TryFrom<SensorRecord> for Sensor {
    type Error = CoreError;

    fn try_from(record: SensorRecord) -> Result<Self, Self::Error> {
        let id = record
            .identifier()
            .map(SensorId::new)
            .ok_or_else(|| CoreError::Deserialization {
                message: format!("sensor '{}' has no identifier", record.name),
            })?;

        Ok(Self {
            id,
            status: SensorStatus::from_wire(&record.status),
            setup_status: SetupStatus::from_wire(&record.setup_status),
            name: record.name,
            description: record.description,
            activation_code: record.activation_code,
        })
    }
}

// ── Sensor keys ────────────────────────────────────────────────────

impl From<SensorKeyRecord> for SensorKey {
    fn from(record: SensorKeyRecord) -> Self {
        Self {
            id: record.id,
            created_at: epoch_to_datetime(record.created_at),
            expires_at: epoch_to_datetime(record.expires_at),
            node_id: record.node_id,
        }
    }
}

// ── License ────────────────────────────────────────────────────────

impl From<LicenseRecord> for License {
    fn from(record: LicenseRecord) -> Self {
        Self {
            control_node_limit: record.control_nodes_allowed,
            sensor_node_limit: record.sensor_nodes_allowed,
            monthly_storage_kb: record.monthly_kb_storage,
            expires_at: epoch_to_datetime(record.expiration),
        }
    }
}

// ── Jobs ───────────────────────────────────────────────────────────

/// Decode a job record, parsing its params as kind `P`.
pub(crate) fn job_from_record<P: JobParams>(record: JobRecord) -> Result<Job<P>, CoreError> {
    let params = serde_json::from_value(Value::Object(record.params)).map_err(|e| {
        CoreError::Deserialization {
            message: format!(
                "{} {}: invalid params: {e}",
                P::KIND,
                record.uuid.as_deref().unwrap_or("<new>")
            ),
        }
    })?;

    let core = JobCore {
        id: record.uuid.filter(|id| !id.is_empty()),
        sensor: record.sensor,
        schedule: record.schedule,
        name: record.name,
        description: record.description,
        disabled: record.disabled,
        app: record.app,
        action: record.action,
        job_type: record.job_type,
        custom: record.custom,
        running: record.running,
        last_run: record.last_run,
        next_run: record.next_run,
    };

    Ok(Job { core, params })
}

/// Encode a job for a create or update request.
pub(crate) fn job_to_record<P: JobParams>(job: &Job<P>) -> Result<JobRecord, CoreError> {
    let params = match serde_json::to_value(&job.params) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(CoreError::Internal(format!(
                "{} params encoded as {other}, expected an object",
                P::KIND
            )));
        }
        Err(e) => return Err(CoreError::Internal(format!("encoding {} params: {e}", P::KIND))),
    };

    let core = &job.core;
    Ok(JobRecord {
        uuid: core.identifier().map(ToOwned::to_owned),
        sensor: core.sensor.clone(),
        schedule: core.schedule.clone(),
        name: core.name.clone(),
        description: core.description.clone(),
        disabled: core.disabled,
        app: core.app.clone(),
        action: core.action.clone(),
        job_type: core.job_type.clone(),
        custom: core.custom,
        params,
        ..JobRecord::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BucketParams, GenericParams, SourceFormat};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bucket_record() -> JobRecord {
        serde_json::from_value(json!({
            "uuid": "j-1",
            "sensor": "s-1",
            "schedule": "0 2 0/1 1/1 * ? *",
            "name": "cloudtrail",
            "description": "",
            "disabled": false,
            "app": "amazon-aws",
            "action": "s3TrackFiles",
            "type": "collection",
            "custom": true,
            "params": {"bucketName": "logs", "path": "/ct", "source": "syslog", "plugin": "PostgreSQL"}
        }))
        .unwrap()
    }

    #[test]
    fn bucket_params_decode() {
        let job = job_from_record::<BucketParams>(bucket_record()).unwrap();
        assert_eq!(job.core.id.as_deref(), Some("j-1"));
        assert_eq!(job.params.bucket_name, "logs");
        assert_eq!(job.params.source_format, SourceFormat::Syslog);
        assert_eq!(job.params.plugin, "PostgreSQL");
    }

    #[test]
    fn record_round_trips_through_generic() {
        let original = bucket_record();
        let job = job_from_record::<GenericParams>(original.clone()).unwrap();
        assert_eq!(job_to_record(&job).unwrap(), original);
    }

    #[test]
    fn sensor_without_identifier_is_rejected() {
        let record = SensorRecord {
            name: "ghost".into(),
            ..SensorRecord::default()
        };
        assert!(Sensor::try_from(record).is_err());
    }

    #[test]
    fn license_expiration_is_epoch_seconds() {
        let license = License::from(LicenseRecord {
            sensor_nodes_allowed: 5,
            expiration: 1_700_000_000,
            ..LicenseRecord::default()
        });
        assert_eq!(license.expires_at.timestamp(), 1_700_000_000);
        assert_eq!(license.sensor_node_limit, 5);
    }
}
