// Scheduler job endpoints
//
// Every job kind lives in the one `/scheduler` collection. There is no
// per-job GET; callers list and filter.

use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::control::client::ControlClient;
use crate::control::models::JobRecord;
use crate::error::Error;

impl ControlClient {
    /// List every job.
    ///
    /// `GET /scheduler`
    pub async fn list_jobs(&self) -> Result<Vec<JobRecord>, Error> {
        self.get("scheduler", "list jobs").await
    }

    /// Create a job and return the server's copy.
    ///
    /// `POST /scheduler`
    pub async fn create_job(&self, job: &JobRecord) -> Result<JobRecord, Error> {
        debug!(name = %job.name, action = %job.action, "creating job");
        self.send_json(Method::POST, "scheduler", Some(job), "create job")
            .await
    }

    /// Replace a job. The response may carry only the base fields.
    ///
    /// `PUT /scheduler/{id}`
    pub async fn update_job(&self, id: &str, job: &JobRecord) -> Result<JobRecord, Error> {
        debug!(id, "updating job");
        self.send_json(
            Method::PUT,
            &format!("scheduler/{id}"),
            Some(job),
            "update job",
        )
        .await
    }

    /// Delete a job. Only HTTP 200 counts as success.
    ///
    /// `DELETE /scheduler/{id}`
    pub async fn delete_job(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting job");
        self.send_expect(
            Method::DELETE,
            &format!("scheduler/{id}"),
            None::<&()>,
            StatusCode::OK,
            "delete job",
        )
        .await
    }
}
