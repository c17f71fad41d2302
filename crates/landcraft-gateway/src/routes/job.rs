use axum::Json;
use axum::extract::State;
use landcraft_db::JobType;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    /// Free-form payload for the worker. Untyped on purpose.
    #[serde(default)]
    pub args: Value,
}

/// `POST /api/job` — insert one job with type `CREATE` and status `NEW`.
pub async fn create_job(
    State(state): State<SharedState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<Value>, ApiError> {
    // A JSON string is stored verbatim; any other value is stored as its
    // serialized text. A missing field becomes an empty payload.
    let args = match request.args {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };

    let job = state.store.create_job(JobType::Create, &args)?;
    info!("created job {}", job.id);

    Ok(Json(json!({ "job": job })))
}
