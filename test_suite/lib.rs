mod background;
mod evaluation;
mod helpers;
mod item;
mod parameter;
mod test_case;
mod user;

use crate::{
    helpers::load_app_settings_for_testing,
    test_case::{EnableTracing, TestCase},
};

#[tokio::test]
async fn health_check() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/health-check").await;
    assert!(
        response.status().is_success(),
        "Health check failed: {}",
        response.status()
    );
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Ok, the server is running!"),
        "Health check response did not contain 'Ok, the server is running!'"
    );

    test_case.end().await;
}

#[tokio::test]
async fn root_returns_hello_world() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"message": "Hello World"}));

    test_case.end().await;
}
