// ── Asynchronous job polling ──
//
// Deletes and unbinds come back as a job resource. The job is re-fetched
// every `interval` until it reaches `finished` or `failed`. Polling is the
// only thing that moves the state forward; a cancelled token or an elapsed
// timeout stops it without another request.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use cfops_api::CloudControllerClient;
use cfops_api::v2::types::{JobResource, JobStatus};

use crate::error::CoreError;

/// How often and for how long to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    /// `None` polls until the job ends or the caller cancels.
    pub timeout: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

/// Poll `job` until it reaches a terminal state.
///
/// Returns the finished job. A `failed` job becomes
/// [`CoreError::JobFailed`] carrying the platform's error details as-is.
pub async fn wait_for_completion(
    client: &CloudControllerClient,
    job: JobResource,
    poll: &PollConfig,
    cancel: &CancellationToken,
) -> Result<JobResource, CoreError> {
    let started = Instant::now();
    let mut job = job;

    loop {
        debug!(job = job.id(), status = %job.entity.status, "job status");
        match job.entity.status {
            JobStatus::Finished => {
                info!(job = job.id(), "job finished");
                return Ok(job);
            }
            JobStatus::Failed => return Err(job_failed(job)),
            JobStatus::Queued | JobStatus::Running | JobStatus::Unknown => {}
        }

        let job_id = job.metadata.guid.clone();
        pause(poll, cancel, started, &job_id).await?;
        job = client.get_job(&job_id).await?;
    }
}

/// Sleep one poll interval, honoring the timeout and cancellation.
///
/// The sleep is cut short at the deadline (`started + timeout`), so a
/// timeout shorter than the interval still fires on time.
pub(crate) async fn pause(
    poll: &PollConfig,
    cancel: &CancellationToken,
    started: Instant,
    job_id: &str,
) -> Result<(), CoreError> {
    let timed_out = || CoreError::PollTimeout {
        job_id: job_id.to_owned(),
        waited_secs: started.elapsed().as_secs(),
    };

    let deadline = poll.timeout.map(|timeout| started + timeout);
    if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
        return Err(timed_out());
    }
    let expired = async {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CoreError::Cancelled {
            job_id: job_id.to_owned(),
        }),
        () = expired => Err(timed_out()),
        () = tokio::time::sleep(poll.interval) => Ok(()),
    }
}

fn job_failed(job: JobResource) -> CoreError {
    let job_id = job.metadata.guid;
    let entity = job.entity;
    match entity.error_details {
        Some(details) => CoreError::JobFailed {
            job_id,
            code: details.code,
            error_code: details.error_code,
            description: details
                .description
                .or(entity.error)
                .unwrap_or_else(|| "job failed".into()),
        },
        None => CoreError::JobFailed {
            job_id,
            code: None,
            error_code: None,
            description: entity.error.unwrap_or_else(|| "job failed".into()),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cfops_api::v2::types::{JobEntity, JobErrorDetails, Metadata, Resource};

    use super::*;

    fn job(status: JobStatus, details: Option<JobErrorDetails>) -> JobResource {
        Resource {
            metadata: Metadata {
                guid: "job-1".into(),
                url: None,
                created_at: None,
                updated_at: None,
            },
            entity: JobEntity {
                guid: Some("job-1".into()),
                status,
                error: Some("Use of entity.error is deprecated".into()),
                error_details: details,
            },
        }
    }

    #[test]
    fn failed_job_carries_platform_details() {
        let err = job_failed(job(
            JobStatus::Failed,
            Some(JobErrorDetails {
                code: Some(10_001),
                description: Some("Route is in use".into()),
                error_code: Some("CF-RouteInUse".into()),
            }),
        ));

        match err {
            CoreError::JobFailed {
                job_id,
                code,
                error_code,
                description,
            } => {
                assert_eq!(job_id, "job-1");
                assert_eq!(code, Some(10_001));
                assert_eq!(error_code.as_deref(), Some("CF-RouteInUse"));
                assert_eq!(description, "Route is in use");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failed_job_without_details_uses_error_text() {
        let err = job_failed(job(JobStatus::Failed, None));
        assert_eq!(
            err.to_string(),
            "Job job-1 failed: Use of entity.error is deprecated"
        );
    }

    #[tokio::test]
    async fn pause_reports_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let poll = PollConfig {
            interval: Duration::from_secs(3600),
            timeout: None,
        };

        let result = pause(&poll, &cancel, Instant::now(), "job-1").await;
        assert!(matches!(result, Err(CoreError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn pause_reports_elapsed_timeout() {
        let poll = PollConfig {
            interval: Duration::from_millis(1),
            timeout: Some(Duration::ZERO),
        };

        let result = pause(&poll, &CancellationToken::new(), Instant::now(), "job-1").await;
        assert!(matches!(result, Err(CoreError::PollTimeout { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_shorter_than_interval_cuts_the_sleep() {
        let poll = PollConfig {
            interval: Duration::from_secs(3600),
            timeout: Some(Duration::from_secs(5)),
        };
        let started = Instant::now();

        let result = pause(&poll, &CancellationToken::new(), started, "job-1").await;

        assert!(matches!(
            result,
            Err(CoreError::PollTimeout { waited_secs: 5, .. })
        ));
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn interval_elapses_before_a_later_deadline() {
        let poll = PollConfig {
            interval: Duration::from_secs(1),
            timeout: Some(Duration::from_secs(60)),
        };
        let started = Instant::now();

        pause(&poll, &CancellationToken::new(), started, "job-1")
            .await
            .unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn default_polls_every_second_without_timeout() {
        let poll = PollConfig::default();
        assert_eq!(poll.interval, Duration::from_secs(1));
        assert_eq!(poll.timeout, None);
    }
}
