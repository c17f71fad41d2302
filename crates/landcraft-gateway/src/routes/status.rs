use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::SharedState;

pub async fn health() -> &'static str {
    "ok"
}

/// `GET /api/status` — liveness plus a job count for quick inspection.
pub async fn status(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    // Counting fails until the schema is migrated; report zero rather than
    // erroring a liveness probe.
    let jobs = state.store.job_count().unwrap_or(0);
    Ok(Json(json!({
        "status": "running",
        "jobs": jobs,
    })))
}
