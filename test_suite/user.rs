use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, extract::State, http::StatusCode as AxumStatusCode, routing::get};
use reqwest::StatusCode;
use serde_json::{Value, json};

use domain::models::User;

use crate::{
    helpers::{load_app_settings_for_testing, spawn_stub},
    test_case::{EnableTracing, TestCase},
};

/// Spawns a stub of the remote users endpoint that counts the requests it receives
async fn spawn_remote_users_stub(
    status_code: AxumStatusCode,
    body: Value,
) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/users",
            get(move |State(hits): State<Arc<AtomicUsize>>| {
                let body = body.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (status_code, Json(body))
                }
            }),
        )
        .with_state(hits.clone());
    let origin = spawn_stub(router).await;
    (format!("{}/users", origin), hits)
}

#[tokio::test]
async fn user_by_key() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/users/user1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let user: Option<User> = response.json().await.unwrap();
    assert_eq!(user, Some(User::new("John", "Doe")));

    let response = test_case.get("/users/user2").await;
    let user: Option<User> = response.json().await.unwrap();
    assert_eq!(user, Some(User::new("Jane", "Doe")));

    test_case.end().await;
}

/// Ensure that an unknown key is answered with `null`, not an error
#[tokio::test]
async fn user_by_unknown_key() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/users/nobody").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "null");

    test_case.end().await;
}

/// Ensure that the remote list is relayed and that exactly one remote request is made
#[tokio::test]
async fn list_remote_users() {
    let (url, hits) = spawn_remote_users_stub(
        AxumStatusCode::OK,
        json!([
            {"id": 1, "name": "Alice", "surname": "Smith"},
            {"id": 2, "name": "Bob", "surname": "Brown"}
        ]),
    )
    .await;
    let mut app_settings = load_app_settings_for_testing();
    app_settings.remote_users.url = url;
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/users").await;
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<User> = response.json().await.unwrap();
    assert_eq!(
        users,
        vec![User::new("Alice", "Smith"), User::new("Bob", "Brown")]
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    test_case.end().await;
}

/// Ensure that a non-200 status from the remote service is reported with its code
#[tokio::test]
async fn list_remote_users_failed() {
    let (url, hits) =
        spawn_remote_users_stub(AxumStatusCode::BAD_REQUEST, json!({"detail": "bad"})).await;
    let mut app_settings = load_app_settings_for_testing();
    app_settings.remote_users.url = url;
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let response = test_case.get("/users").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"messages": ["Error: 400"]}));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    test_case.end().await;
}
