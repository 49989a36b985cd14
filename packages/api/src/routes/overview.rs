//! Headline metrics for the overview panel

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use failscope::OverviewMetrics;

pub fn routes() -> Router<AppState> {
    Router::new().route("/overview", get(get_overview))
}

#[utoipa::path(
    get,
    path = "/overview",
    tag = "metrics",
    responses(
        (status = 200, description = "Accuracy, macro precision/recall/F1, and the four-way confidence breakdown", body = OverviewMetrics)
    )
)]
#[tracing::instrument(name = "GET /overview", skip(state))]
pub async fn get_overview(State(state): State<AppState>) -> Result<Json<OverviewMetrics>, ApiError> {
    Ok(Json(state.overview.clone()))
}
