use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::{
    helpers::load_app_settings_for_testing,
    test_case::{EnableTracing, TestCase},
};

/// Ensure that an item can be created and read back from the in-memory store
#[tokio::test]
async fn create_and_read_item() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let request_body = json!({"id": 1, "name": "item1", "description": "first item"});
    let response = test_case.post("/db/create", &request_body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, request_body);
    assert_eq!(test_case.app_state.item_store.len().await, 1);

    let response = test_case.post("/db/read", &json!({"id": 1})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"name": "item1", "description": "first item"}));

    test_case.end().await;
}

/// Ensure that creating an item with an existing ID overwrites it
#[tokio::test]
async fn create_item_overwrites_existing_id() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    for name in ["before", "after"] {
        let request_body = json!({"id": 7, "name": name, "description": ""});
        let response = test_case.post("/db/create", &request_body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    assert_eq!(test_case.app_state.item_store.len().await, 1);

    let response = test_case.post("/db/read", &json!({"id": 7})).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "after");

    test_case.end().await;
}

#[tokio::test]
async fn read_missing_item() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.post("/db/read", &json!({"id": 999})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"messages": ["Item not found"]}));

    test_case.end().await;
}

#[tokio::test]
async fn create_invalid_item() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case
        .post("/db/create", &json!({"id": 1, "name": "  ", "description": ""}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = test_case.post_raw("/db/create", r#"{"id": 1,"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = test_case.post("/db/create", &json!({"name": "item1"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test_case.app_state.item_store.len().await, 0);

    test_case.end().await;
}
