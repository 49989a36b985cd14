//! Route tests over an in-memory artifact set

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use failscope::store::StoredArtifacts;
use failscope::{EvalConfig, EvalReport, LabelSet, RecordBuilder};
use failscope_api::construct_router;
use failscope_api::state::State;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn test_router() -> Router {
    let labels = LabelSet::new(vec!["cat".into(), "dog".into()]).unwrap();
    let config = EvalConfig {
        model_name: "test-model".into(),
        dataset_name: "test-set".into(),
        ..EvalConfig::default()
    };
    let builder = RecordBuilder::new(&labels, &config);

    let records = vec![
        // correct, confident
        builder.build(0, 0, vec![0.95, 0.05]).unwrap(),
        // wrong, confident (high-confidence error)
        builder.build(1, 0, vec![0.1, 0.9]).unwrap(),
        // wrong, unsure
        builder.build(2, 1, vec![0.55, 0.45]).unwrap(),
        // correct, unsure
        builder.build(3, 1, vec![0.4, 0.6]).unwrap(),
        // correct, confident
        builder.build(4, 1, vec![0.2, 0.8]).unwrap(),
    ];

    let report = EvalReport::compute(records, &labels, &config).unwrap();
    let state = State::from_artifacts(StoredArtifacts {
        overview: report.overview,
        confusion: report.confusion,
        confidence_curve: report.confidence_curve,
        errors_by_class: report.errors_by_class,
        calibration: report.calibration,
        labels: report.labels,
        predictions: report.records,
    });
    construct_router(Arc::new(state))
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get_text(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health_and_overview() {
    let router = test_router();

    let (status, body) = get_json(&router, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get_json(&router, "/api/v1/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modelName"], "test-model");
    assert_eq!(body["totalSamples"], 5);
    assert!((body["accuracy"].as_f64().unwrap() - 0.6).abs() < 1e-12);
}

#[tokio::test]
async fn test_artifact_endpoints_serve_loaded_data() {
    let router = test_router();

    let (status, body) = get_json(&router, "/api/v1/confusion-matrix").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["labels"], serde_json::json!(["cat", "dog"]));
    let total: u64 = body["matrix"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(total, 5);

    let (status, body) = get_json(&router, "/api/v1/confidence-curve").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 10);

    let (status, body) = get_json(&router, "/api/v1/errors-by-class").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get_json(&router, "/api/v1/calibration").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["ece"].as_f64().unwrap() >= 0.0);

    let (status, body) = get_json(&router, "/api/v1/labels").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["cat", "dog"]));
}

#[tokio::test]
async fn test_predictions_default_sort_and_pagination() {
    let router = test_router();

    let (status, body) = get_json(&router, "/api/v1/predictions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 10);
    assert_eq!(body["totalPages"], 1);

    // Default sort is confidence descending
    let confidences: Vec<f64> = body["predictions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["confidence"].as_f64().unwrap())
        .collect();
    for pair in confidences.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[tokio::test]
async fn test_predictions_filters() {
    let router = test_router();

    let (_, body) = get_json(&router, "/api/v1/predictions?only_errors=true").await;
    assert_eq!(body["total"], 2);

    let (_, body) = get_json(&router, "/api/v1/predictions?only_high_confidence_errors=true").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["predictions"][0]["id"], "pred_00001");

    let (_, body) = get_json(&router, "/api/v1/predictions?true_label=dog").await;
    assert_eq!(body["total"], 3);

    let (_, body) = get_json(&router, "/api/v1/predictions?pred_label=dog").await;
    assert_eq!(body["total"], 3);

    let (_, body) =
        get_json(&router, "/api/v1/predictions?min_conf=0.6&max_conf=0.9").await;
    assert_eq!(body["total"], 3);

    let (_, body) = get_json(&router, "/api/v1/predictions?true_label=bird").await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_predictions_pagination_and_validation() {
    let router = test_router();

    let (_, body) = get_json(&router, "/api/v1/predictions?page=2&page_size=2").await;
    assert_eq!(body["total"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["predictions"].as_array().unwrap().len(), 2);

    // Page size is clamped to the cap
    let (_, body) = get_json(&router, "/api/v1/predictions?page_size=1000").await;
    assert_eq!(body["pageSize"], 100);

    let (status, _) = get_json(&router, "/api/v1/predictions?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get_json(&router, "/api/v1/predictions?min_conf=1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_predictions_sort_ascending_stable() {
    let router = test_router();

    let (_, body) = get_json(&router, "/api/v1/predictions?sort=confidence_asc").await;
    let confidences: Vec<f64> = body["predictions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["confidence"].as_f64().unwrap())
        .collect();
    for pair in confidences.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[tokio::test]
async fn test_prediction_by_id() {
    let router = test_router();

    let (status, body) = get_json(&router, "/api/v1/predictions/pred_00001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHighConfidenceError"], true);
    assert_eq!(body["trueLabel"], "cat");
    assert_eq!(body["predictedLabel"], "dog");

    let (status, body) = get_json(&router, "/api/v1/predictions/pred_99999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_export_endpoints() {
    let router = test_router();

    let (status, body) = get_text(&router, "/api/v1/export/predictions.jsonl").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.lines().count(), 5);

    let (status, body) =
        get_text(&router, "/api/v1/export/predictions.jsonl?only_errors=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.lines().count(), 2);

    let (status, body) = get_text(&router, "/api/v1/export/predictions.csv").await;
    assert_eq!(status, StatusCode::OK);
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,trueLabel,predictedLabel,confidence,isCorrect,isHighConfidenceError"
    );
    assert_eq!(lines.count(), 5);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let router = test_router();

    let (status, body) = get_json(&router, "/api/v1/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/predictions").is_some());
}
