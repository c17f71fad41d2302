use axum::extract::State;

use crate::error::ApiError;
use crate::state::SharedState;

/// `POST /api/db` — run a migration command.
///
/// The body is raw text, split on whitespace into tokens for the migration
/// runner. The response is the runner's log, one line per line. An empty
/// body is a no-op and returns an empty log.
pub async fn run_migrations(
    State(state): State<SharedState>,
    body: String,
) -> Result<String, ApiError> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    let log = state.store.migrate(&tokens)?;
    Ok(log.join("\n"))
}
