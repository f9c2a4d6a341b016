// Job status endpoint.

use super::types::JobResource;
use crate::client::CloudControllerClient;
use crate::error::Error;

impl CloudControllerClient {
    /// `GET /v2/jobs/:guid`
    pub async fn get_job(&self, job_id: &str) -> Result<JobResource, Error> {
        self.get(&format!("v2/jobs/{job_id}")).await
    }
}
