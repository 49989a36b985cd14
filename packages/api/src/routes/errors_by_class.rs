//! Per-class error breakdown artifact

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use failscope::ClassErrorStats;

pub fn routes() -> Router<AppState> {
    Router::new().route("/errors-by-class", get(get_errors_by_class))
}

#[utoipa::path(
    get,
    path = "/errors-by-class",
    tag = "metrics",
    responses(
        (status = 200, description = "Error counts, rates, and mean error confidence per class, canonical label order", body = [ClassErrorStats])
    )
)]
#[tracing::instrument(name = "GET /errors-by-class", skip(state))]
pub async fn get_errors_by_class(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassErrorStats>>, ApiError> {
    Ok(Json(state.errors_by_class.clone()))
}
