use crate::error::AppError;
use crate::startup::AppState;
use axum::{extract::State, Json};
use serde_json::Value;

/// Relay a motivational statement from the external quote service.
pub async fn get_motive(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let statement = state.quotes.fetch_affirmation().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch affirmation from upstream");
        AppError::Quote(e)
    })?;

    Ok(Json(statement))
}
