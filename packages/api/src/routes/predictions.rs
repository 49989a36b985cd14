//! Prediction exploration: filtered, sorted, paginated record listing

use crate::error::ApiError;
use crate::not_found;
use crate::state::{AppState, MAX_PAGE_SIZE, PredictionFilter, SortOrder};
use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get};
use failscope::PredictionRecord;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/predictions", get(get_predictions))
        .route("/predictions/{prediction_id}", get(get_prediction_by_id))
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PredictionsQuery {
    /// Keep only incorrect predictions
    #[serde(default)]
    pub only_errors: bool,
    /// Keep only wrong predictions made above the confidence threshold
    #[serde(default)]
    pub only_high_confidence_errors: bool,
    /// Keep records with this ground-truth label
    pub true_label: Option<String>,
    /// Keep records with this predicted label
    pub pred_label: Option<String>,
    /// Inclusive lower confidence bound
    pub min_conf: Option<f64>,
    /// Inclusive upper confidence bound
    pub max_conf: Option<f64>,
    /// 1-based page number
    pub page: Option<usize>,
    /// Records per page, capped at 100
    pub page_size: Option<usize>,
    pub sort: Option<SortOrder>,
}

impl PredictionsQuery {
    pub fn filter(&self) -> Result<PredictionFilter, ApiError> {
        for (name, value) in [("min_conf", self.min_conf), ("max_conf", self.max_conf)] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ApiError::bad_request(format!(
                        "{name} must be in [0,1], got {v}"
                    )));
                }
            }
        }
        Ok(PredictionFilter {
            only_errors: self.only_errors,
            only_high_confidence_errors: self.only_high_confidence_errors,
            true_label: self.true_label.clone(),
            predicted_label: self.pred_label.clone(),
            min_confidence: self.min_conf,
            max_confidence: self.max_conf,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedPredictions {
    pub predictions: Vec<PredictionRecord>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

#[utoipa::path(
    get,
    path = "/predictions",
    tag = "predictions",
    params(PredictionsQuery),
    responses(
        (status = 200, description = "Filtered, sorted page of prediction records", body = PaginatedPredictions),
        (status = 400, description = "Invalid filter or pagination parameter")
    )
)]
#[tracing::instrument(name = "GET /predictions", skip(state))]
pub async fn get_predictions(
    State(state): State<AppState>,
    Query(query): Query<PredictionsQuery>,
) -> Result<Json<PaginatedPredictions>, ApiError> {
    let filter = query.filter()?;
    let page = query.page.unwrap_or(1);
    if page == 0 {
        return Err(ApiError::bad_request("page must be at least 1"));
    }
    let page_size = query.page_size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE);

    let filtered = state.query_predictions(&filter, query.sort.unwrap_or_default());
    let total = filtered.len();
    let total_pages = if total == 0 {
        1
    } else {
        total.div_ceil(page_size)
    };

    let predictions = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    Ok(Json(PaginatedPredictions {
        predictions,
        total,
        page,
        page_size,
        total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/predictions/{prediction_id}",
    tag = "predictions",
    params(("prediction_id" = String, Path, description = "Record id, e.g. pred_00042")),
    responses(
        (status = 200, description = "Single prediction record", body = PredictionRecord),
        (status = 404, description = "Unknown prediction id")
    )
)]
#[tracing::instrument(name = "GET /predictions/{id}", skip(state))]
pub async fn get_prediction_by_id(
    State(state): State<AppState>,
    Path(prediction_id): Path<String>,
) -> Result<Json<PredictionRecord>, ApiError> {
    state
        .prediction_by_id(&prediction_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found!("Prediction not found: {prediction_id}"))
}
