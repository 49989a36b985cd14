//! Bulk export of the filtered record list
//!
//! Same filter parameters as `/predictions`, but unpaginated: the client
//! downloads everything matching the filter as JSONL or CSV.

use crate::error::ApiError;
use crate::routes::predictions::PredictionsQuery;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Router, routing::get};
use failscope::PredictionRecord;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/export/predictions.jsonl", get(export_jsonl))
        .route("/export/predictions.csv", get(export_csv))
}

#[utoipa::path(
    get,
    path = "/export/predictions.jsonl",
    tag = "export",
    params(PredictionsQuery),
    responses(
        (status = 200, description = "Filtered records, one JSON object per line", content_type = "application/x-ndjson")
    )
)]
#[tracing::instrument(name = "GET /export/predictions.jsonl", skip(state))]
pub async fn export_jsonl(
    State(state): State<AppState>,
    Query(query): Query<PredictionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query.filter()?;
    let records = state.query_predictions(&filter, query.sort.unwrap_or_default());

    let mut body = String::new();
    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|e| ApiError::internal(format!("Failed to serialize record: {e}")))?;
        body.push_str(&line);
        body.push('\n');
    }

    Ok((
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        body,
    ))
}

#[utoipa::path(
    get,
    path = "/export/predictions.csv",
    tag = "export",
    params(PredictionsQuery),
    responses(
        (status = 200, description = "Filtered records as CSV", content_type = "text/csv")
    )
)]
#[tracing::instrument(name = "GET /export/predictions.csv", skip(state))]
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<PredictionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query.filter()?;
    let records = state.query_predictions(&filter, query.sort.unwrap_or_default());

    let mut body =
        String::from("id,trueLabel,predictedLabel,confidence,isCorrect,isHighConfidenceError\n");
    for record in records {
        body.push_str(&csv_row(record));
        body.push('\n');
    }

    Ok(([(header::CONTENT_TYPE, "text/csv")], body))
}

fn csv_row(record: &PredictionRecord) -> String {
    format!(
        "{},{},{},{},{},{}",
        csv_field(&record.id),
        csv_field(&record.true_label),
        csv_field(&record.predicted_label),
        record.confidence,
        record.is_correct,
        record.is_high_confidence_error
    )
}

/// Quote a field when it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
