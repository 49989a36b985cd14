use crate::routes;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Failscope API",
        version = "1.0.0",
        description = "Read-only API over one evaluation run's artifacts: \
            overview metrics, confusion matrix, confidence curve, per-class \
            errors, calibration report, and the filterable prediction list.",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "metrics", description = "Precomputed evaluation artifacts"),
        (name = "predictions", description = "Per-record exploration"),
        (name = "export", description = "Bulk download of filtered records")
    ),
    paths(
        routes::health::health,
        routes::overview::get_overview,
        routes::confusion_matrix::get_confusion_matrix,
        routes::confidence_curve::get_confidence_curve,
        routes::errors_by_class::get_errors_by_class,
        routes::calibration::get_calibration,
        routes::labels::get_labels,
        routes::predictions::get_predictions,
        routes::predictions::get_prediction_by_id,
        routes::export::export_jsonl,
        routes::export::export_csv,
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().unwrap();
        assert!(json.contains("/predictions"));
        assert!(json.contains("/calibration"));
    }
}
