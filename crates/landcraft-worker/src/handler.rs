use async_trait::async_trait;
use landcraft_common::Result;
use landcraft_db::Job;
use tracing::info;

/// Processes one job. The worker marks the job `DONE` when this returns
/// `Ok`; on `Err` the job stays `NEW` and is retried on the next poll.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn process(&self, job: &Job) -> Result<()>;
}

/// Placeholder handler used by the `work` command until real job
/// processing lands: logs the payload and reports success.
pub struct LoggingJobHandler;

#[async_trait]
impl JobHandler for LoggingJobHandler {
    async fn process(&self, job: &Job) -> Result<()> {
        info!("job {} args: {}", job.id, job.args);
        Ok(())
    }
}
