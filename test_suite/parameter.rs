use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::{
    helpers::{ResponseParts, load_app_settings_for_testing, split_response},
    test_case::{EnableTracing, TestCase},
};

/// Ensure that the static route takes precedence over the parameterized route
#[tokio::test]
async fn path_parameters_about_is_not_captured() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/path_parameters/about").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "This route is used to demonstrate how to access path parameters"
    );

    test_case.end().await;
}

#[tokio::test]
async fn path_parameters() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/path_parameters/42").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"path_parameter": 42}));

    let ResponseParts {
        status_code, body, ..
    } = split_response(test_case.get("/path_parameters/abc").await).await;
    assert_eq!(status_code, StatusCode::BAD_REQUEST);
    assert!(body.contains("messages"), "unexpected body: {}", body);

    test_case.end().await;
}

#[tokio::test]
async fn predefined_path_parameters() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/predefined_path_parameters/value2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"parameter": "value2", "message": "This is the second predefined value"})
    );

    let response = test_case.get("/predefined_path_parameters/value4").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    test_case.end().await;
}

#[tokio::test]
async fn query_parameters() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case
        .get_with_query("/query_parameters", &[("q1", "3"), ("q2", "4")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"sum": 7}));

    // q2 defaults to 5
    let response = test_case
        .get_with_query("/query_parameters", &[("q1", "3")])
        .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"sum": 8}));

    let response = test_case.get("/query_parameters").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    test_case.end().await;
}
