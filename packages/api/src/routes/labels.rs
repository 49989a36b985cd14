//! Configured label set, canonical order

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new().route("/labels", get(get_labels))
}

#[utoipa::path(
    get,
    path = "/labels",
    tag = "metrics",
    responses(
        (status = 200, description = "Class labels in canonical index order", body = [String])
    )
)]
#[tracing::instrument(name = "GET /labels", skip(state))]
pub async fn get_labels(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.labels.clone()))
}
