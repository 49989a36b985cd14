//! HTTP serving layer for failscope
//!
//! A thin, read-only surface over the precomputed artifact set: every
//! endpoint loads, filters, or serializes what the evaluation pipeline
//! already derived. Nothing is recomputed here.

use axum::{Json, Router, routing::get};
use error::ApiError;
use failscope_types::Value;
use serde_json::json;
use state::AppState;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

pub use axum;

pub fn construct_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(api_info))
        .route("/openapi.json", get(openapi_document))
        .merge(routes::health::routes())
        .merge(routes::overview::routes())
        .merge(routes::confusion_matrix::routes())
        .merge(routes::confidence_curve::routes())
        .merge(routes::errors_by_class::routes())
        .merge(routes::calibration::routes())
        .merge(routes::labels::routes())
        .merge(routes::predictions::routes())
        .merge(routes::export::routes())
        .with_state(state);

    Router::new()
        .nest("/api/v1", router)
        .layer(CorsLayer::permissive())
}

#[tracing::instrument(name = "GET /")]
async fn api_info() -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({
        "name": "Failscope API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "overview": "/api/v1/overview",
            "confusionMatrix": "/api/v1/confusion-matrix",
            "confidenceCurve": "/api/v1/confidence-curve",
            "errorsByClass": "/api/v1/errors-by-class",
            "calibration": "/api/v1/calibration",
            "labels": "/api/v1/labels",
            "predictions": "/api/v1/predictions",
            "predictionById": "/api/v1/predictions/{id}",
            "export": "/api/v1/export/predictions.jsonl"
        }
    })))
}

async fn openapi_document() -> Result<Json<Value>, ApiError> {
    let doc = openapi::ApiDoc::openapi();
    let value = serde_json::to_value(doc)
        .map_err(|e| ApiError::internal(format!("Failed to render OpenAPI document: {e}")))?;
    Ok(Json(value))
}
