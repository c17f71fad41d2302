use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a job asks the worker to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobType {
    Create,
    Edit,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Create => "CREATE",
            JobType::Edit => "EDIT",
        }
    }
}

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(JobType::Create),
            "EDIT" => Ok(JobType::Edit),
            _ => Err(format!("unknown job type: {s}")),
        }
    }
}

/// Where a job is in its lifecycle. Jobs are always created `New`; the
/// worker moves them to `Done` after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    New,
    Done,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::New => "NEW",
            JobStatus::Done => "DONE",
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(JobStatus::New),
            "DONE" => Ok(JobStatus::Done),
            _ => Err(format!("unknown job status: {s}")),
        }
    }
}

/// A persisted job row. Ids are UUIDv7, so sorting by id is creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub job_type: JobType,
    pub job_status: JobStatus,
    pub args: String,
    pub created_at: DateTime<Utc>,
}
