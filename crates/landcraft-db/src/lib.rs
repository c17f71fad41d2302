pub mod job;
pub mod job_store;
pub mod migrations;

pub use job::{Job, JobStatus, JobType};
pub use job_store::JobStore;
