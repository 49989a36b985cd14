//! Calibration report artifact

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use failscope::CalibrationReport;

pub fn routes() -> Router<AppState> {
    Router::new().route("/calibration", get(get_calibration))
}

#[utoipa::path(
    get,
    path = "/calibration",
    tag = "metrics",
    responses(
        (status = 200, description = "Reliability bins plus Expected Calibration Error", body = CalibrationReport)
    )
)]
#[tracing::instrument(name = "GET /calibration", skip(state))]
pub async fn get_calibration(
    State(state): State<AppState>,
) -> Result<Json<CalibrationReport>, ApiError> {
    Ok(Json(state.calibration.clone()))
}
