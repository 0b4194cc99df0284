use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode as AxumStatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::StatusCode;
use serde_json::{Value, json};

use domain::models::{ConfusionMatrixChart, LineChart, Point, TextColor};

use crate::{
    helpers::{load_app_settings_for_testing, spawn_stub},
    test_case::{EnableTracing, TestCase},
};

/// Stub of the tracking service's metric history endpoint
///
/// Only the run `run1` exists. The train loss is split into two pages.
async fn get_history(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("run_id").map(String::as_str) != Some("run1") {
        return (
            AxumStatusCode::NOT_FOUND,
            Json(json!({"error_code": "RESOURCE_DOES_NOT_EXIST"})),
        )
            .into_response();
    }
    let page_token = params.get("page_token").map(String::as_str);
    let body = match (params.get("metric_key").map(String::as_str), page_token) {
        (Some("train_loss"), None) => json!({
            "metrics": [
                {"key": "train_loss", "value": 0.5, "timestamp": 1700000001000i64, "step": 1},
                {"key": "train_loss", "value": 0.9, "timestamp": 1700000000000i64, "step": 0}
            ],
            "next_page_token": "page2"
        }),
        (Some("train_loss"), Some("page2")) => json!({
            "metrics": [
                {"key": "train_loss", "value": 0.3, "timestamp": 1700000002000i64, "step": 2}
            ]
        }),
        (Some("validation_loss"), None) => json!({
            "metrics": [
                {"key": "validation_loss", "value": 1.0, "timestamp": 1700000000000i64, "step": 0},
                {"key": "validation_loss", "value": 0.7, "timestamp": 1700000001000i64, "step": 1}
            ]
        }),
        _ => json!({}),
    };
    Json(body).into_response()
}

async fn spawn_tracking_stub() -> String {
    let router = Router::new().route("/api/2.0/mlflow/metrics/get-history", get(get_history));
    spawn_stub(router).await
}

#[tokio::test]
async fn loss_curves() {
    let mut app_settings = load_app_settings_for_testing();
    app_settings.tracking.uri = spawn_tracking_stub().await;
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/evaluation/runs/run1/loss-curves").await;
    assert_eq!(response.status(), StatusCode::OK);
    let chart: LineChart = response.json().await.unwrap();
    assert_eq!(chart.title, "Train - Validation Loss Curves");
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].label, "Train Loss");
    assert_eq!(
        chart.series[0].points,
        vec![
            Point { x: 0, y: 0.9 },
            Point { x: 1, y: 0.5 },
            Point { x: 2, y: 0.3 }
        ]
    );
    assert_eq!(chart.series[1].label, "Validation Loss");
    assert_eq!(chart.series[1].points.len(), 2);

    test_case.end().await;
}

#[tokio::test]
async fn loss_curves_of_unknown_run() {
    let mut app_settings = load_app_settings_for_testing();
    app_settings.tracking.uri = spawn_tracking_stub().await;
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/evaluation/runs/unknown/loss-curves").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"messages": ["Error: 404"]}));

    test_case.end().await;
}

#[tokio::test]
async fn confusion_matrix() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let request_body = json!({
        "yTrue": [0, 0, 0, 1],
        "yPred": [0, 0, 1, 1],
        "classes": ["cat", "dog"]
    });
    let response = test_case
        .post("/evaluation/confusion-matrix", &request_body)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let chart: ConfusionMatrixChart = response.json().await.unwrap();
    assert_eq!(chart.tick_labels, vec!["cat", "dog"]);
    assert_eq!(chart.figsize, [10.0, 10.0]);
    assert_eq!(chart.text_size, 15);
    assert_eq!(chart.threshold, 1.0);
    let texts = chart
        .cells
        .iter()
        .map(|cell| cell.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(texts, vec!["2 (66.7%)", "1 (33.3%)", "0 (0.0%)", "1 (100.0%)"]);
    assert_eq!(chart.cells[0].text_color, TextColor::White);
    assert_eq!(chart.cells[1].text_color, TextColor::Black);

    test_case.end().await;
}

#[tokio::test]
async fn confusion_matrix_with_invalid_input() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    // Lengths differ
    let response = test_case
        .post(
            "/evaluation/confusion-matrix",
            &json!({"yTrue": [0, 1], "yPred": [0]}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Number of classes differs from the number of labels
    let response = test_case
        .post(
            "/evaluation/confusion-matrix",
            &json!({"yTrue": [0, 1], "yPred": [0, 1], "classes": ["a", "b", "c"]}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    test_case.end().await;
}
