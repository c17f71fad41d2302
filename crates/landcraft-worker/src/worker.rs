use std::sync::Arc;
use std::time::Duration;

use landcraft_common::Result;
use landcraft_db::{JobStatus, JobStore, JobType};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::handler::JobHandler;

/// Polls the job table and feeds `NEW` `CREATE` jobs to a handler.
///
/// Succeeded jobs are marked `DONE`; failed jobs keep their `NEW` status
/// and are picked up again on the next poll.
pub struct JobWorker {
    store: Arc<JobStore>,
    handler: Arc<dyn JobHandler>,
    interval: Duration,
}

impl JobWorker {
    pub fn new(store: Arc<JobStore>, handler: Arc<dyn JobHandler>, interval: Duration) -> Self {
        Self {
            store,
            handler,
            interval,
        }
    }

    /// One poll pass. Returns how many jobs were processed successfully.
    pub async fn tick(&self) -> Result<usize> {
        let jobs = self.store.list_jobs(JobType::Create, &[JobStatus::New])?;
        if jobs.is_empty() {
            info!("no jobs to execute");
            return Ok(0);
        }

        let mut processed = 0;
        for job in &jobs {
            info!(
                "processing job '{}' with status '{}'",
                job.id,
                job.job_status.as_str()
            );
            match self.handler.process(job).await {
                Ok(()) => {
                    self.store.update_job_status(&job.id, JobStatus::Done)?;
                    processed += 1;
                }
                Err(e) => {
                    warn!("error processing job '{}': {e}", job.id);
                }
            }
        }

        info!("processed {processed} of {} jobs", jobs.len());
        Ok(processed)
    }

    /// Poll until the shutdown signal fires. Jobs queued before startup are
    /// picked up right away: each pass polls first, then sleeps.
    pub async fn run_until(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "worker started, polling every {} seconds",
            self.interval.as_secs()
        );
        loop {
            if let Err(e) = self.tick().await {
                warn!("worker tick failed: {e}");
            }
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.changed() => {
                    info!("worker shutting down");
                    break;
                }
            }
        }
    }
}
