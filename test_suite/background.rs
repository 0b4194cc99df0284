use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::{
    helpers::load_app_settings_for_testing,
    test_case::{EnableTracing, TestCase},
};

/// Ensure that the response is returned before the task completes, and that the task completes later
#[tokio::test]
async fn background_task_completes_after_response() {
    let mut app_settings = load_app_settings_for_testing();
    app_settings.background_task.delay = 1;
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.post_without_body("/background_task").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Background task started"}));
    assert_eq!(test_case.app_state.background_tasks.completed(), 0);

    let mut completed = 0;
    for _ in 0..50 {
        completed = test_case.app_state.background_tasks.completed();
        if completed > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(completed, 1);

    test_case.end().await;
}
