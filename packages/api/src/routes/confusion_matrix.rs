//! Confusion matrix artifact

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use failscope::ConfusionMatrix;

pub fn routes() -> Router<AppState> {
    Router::new().route("/confusion-matrix", get(get_confusion_matrix))
}

#[utoipa::path(
    get,
    path = "/confusion-matrix",
    tag = "metrics",
    responses(
        (status = 200, description = "matrix[t][p] counts records with true label t predicted as p", body = ConfusionMatrix)
    )
)]
#[tracing::instrument(name = "GET /confusion-matrix", skip(state))]
pub async fn get_confusion_matrix(
    State(state): State<AppState>,
) -> Result<Json<ConfusionMatrix>, ApiError> {
    Ok(Json(state.confusion.clone()))
}
