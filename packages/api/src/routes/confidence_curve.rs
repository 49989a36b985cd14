//! Confidence-vs-accuracy curve artifact

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use failscope::ConfidenceCurvePoint;

pub fn routes() -> Router<AppState> {
    Router::new().route("/confidence-curve", get(get_confidence_curve))
}

#[utoipa::path(
    get,
    path = "/confidence-curve",
    tag = "metrics",
    responses(
        (status = 200, description = "Per-bucket accuracy in ascending confidence order", body = [ConfidenceCurvePoint])
    )
)]
#[tracing::instrument(name = "GET /confidence-curve", skip(state))]
pub async fn get_confidence_curve(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConfidenceCurvePoint>>, ApiError> {
    Ok(Json(state.confidence_curve.clone()))
}
