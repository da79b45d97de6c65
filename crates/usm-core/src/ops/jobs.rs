// ── Scheduler job operations ──
//
// All job kinds share one collection with no per-job GET, so reads list
// everything and filter: by action tag for typed kinds, not at all for the
// generic kind. Writes stamp the kind's fixed tags first.

use std::marker::PhantomData;

use tracing::{debug, warn};
use usm_api::ControlClient;

use crate::convert::{job_from_record, job_to_record};
use crate::error::CoreError;
use crate::model::{Job, JobParams};

pub struct JobSet<'a, P> {
    client: &'a ControlClient,
    kind: PhantomData<fn() -> P>,
}

impl<'a, P: JobParams> JobSet<'a, P> {
    pub fn new(client: &'a ControlClient) -> Self {
        Self {
            client,
            kind: PhantomData,
        }
    }

    /// Every job of this kind. Records whose params fail to decode are
    /// skipped so one bad sibling cannot hide the rest.
    pub async fn list(&self) -> Result<Vec<Job<P>>, CoreError> {
        let records = self.client.list_jobs().await?;
        Ok(records
            .into_iter()
            .filter(|record| match P::TAGS {
                Some(tags) => record.action == tags.action.as_ref(),
                None => true,
            })
            .filter_map(|record| match job_from_record::<P>(record) {
                Ok(job) => Some(job),
                Err(e) => {
                    warn!(error = %e, kind = P::KIND, "skipping job record");
                    None
                }
            })
            .collect())
    }

    /// The job with identifier `id`, scanning one full listing.
    pub async fn get(&self, id: &str) -> Result<Job<P>, CoreError> {
        self.list()
            .await?
            .into_iter()
            .find(|job| job.core.identifier() == Some(id))
            .ok_or_else(|| CoreError::not_found(P::KIND, id))
    }

    /// Create `job`, writing the server-assigned identifier back into it.
    pub async fn create(&self, job: &mut Job<P>) -> Result<(), CoreError> {
        if job.core.identifier().is_some() {
            return Err(CoreError::validation(
                "cannot specify an identifier when creating a job",
            ));
        }
        if let Some(tags) = P::TAGS {
            job.core.stamp(&tags);
        }

        let record = job_to_record(job)?;
        let created = self.client.create_job(&record).await?;

        let id = created
            .uuid
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::Creation {
                message: format!("server returned no identifier for new {}", P::KIND),
            })?;
        debug!(id = %id, kind = P::KIND, "job created");
        job.core.id = Some(id);
        Ok(())
    }

    /// Replace `job` on the server.
    pub async fn update(&self, job: &mut Job<P>) -> Result<(), CoreError> {
        let id = require_id::<P>(job, "update")?;
        if let Some(tags) = P::TAGS {
            job.core.stamp(&tags);
        }

        let record = job_to_record(job)?;
        let updated = self.client.update_job(&id, &record).await?;
        if let Some(returned) = updated.uuid.filter(|id| !id.is_empty()) {
            job.core.id = Some(returned);
        }
        Ok(())
    }

    pub async fn delete(&self, job: &Job<P>) -> Result<(), CoreError> {
        let id = require_id::<P>(job, "delete")?;
        self.client.delete_job(&id).await?;
        Ok(())
    }
}

fn require_id<P: JobParams>(job: &Job<P>, verb: &str) -> Result<String, CoreError> {
    job.core
        .identifier()
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            CoreError::validation(format!("cannot {verb} a {} without an identifier", P::KIND))
        })
}
