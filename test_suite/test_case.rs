use std::{thread::JoinHandle, time::Duration};

use serde::Serialize;
use settings::AppSettings;
use tokio::sync::oneshot;

use app::create_app_state;
use infra::AppState;

use crate::helpers::{TestApp, configure_test_app, spawn_app};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether the test case prints its lifecycle to the standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableTracing {
    Yes,
    No,
}

/// Test case for integration tests
///
/// ```
/// #[tokio::test]
/// async fn integration_test_case_skeleton() {
///     // Initialize the test case
///     let app_settings = load_app_settings_for_testing();
///     let test_case = TestCase::begin(app_settings, EnableTracing::Yes).await;
///
///     /************************************************************
///
///             Implement integration test logic here
///
///     *************************************************************/
///
///     // Terminate the test case gracefully
///     test_case.end().await;
/// }
/// ```
pub struct TestCase {
    pub app_state: AppState,
    app_handle: JoinHandle<()>,
    shutdown_signal: oneshot::Sender<()>,
    tracing: EnableTracing,
    pub http_client: reqwest::Client,
}

impl TestCase {
    pub async fn begin(app_settings: AppSettings, tracing: EnableTracing) -> Self {
        let TestApp {
            app_settings,
            listener,
        } = configure_test_app(app_settings).await;
        let app_state = create_app_state(app_settings).unwrap();
        let (app_handle, shutdown_signal) = spawn_app(app_state.clone(), listener).await;
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap();
        if tracing == EnableTracing::Yes {
            println!(
                "Test application started on port: {}",
                app_state.app_settings.http.port
            );
        }
        Self {
            app_state,
            app_handle,
            shutdown_signal,
            tracing,
            http_client,
        }
    }

    pub async fn end(self) {
        let log = self.tracing == EnableTracing::Yes;
        if log {
            println!("Sending graceful shutdown signal...");
        }
        self.shutdown_signal.send(()).unwrap();
        if log {
            println!("Waiting for server to gracefully shutdown...");
        }
        self.app_handle.join().unwrap();
        if log {
            println!("Server has gracefully shutdown.");
        }
    }

    pub fn origin(&self) -> String {
        self.app_state.app_settings.http.origin()
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        let uri = format!("{}{}", self.origin(), path);
        self.http_client.get(&uri).send().await.unwrap()
    }

    pub async fn get_with_query<Q>(&self, path: &str, query: &Q) -> reqwest::Response
    where
        Q: Serialize + ?Sized,
    {
        let uri = format!("{}{}", self.origin(), path);
        self.http_client.get(&uri).query(query).send().await.unwrap()
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> reqwest::Response
    where
        B: Serialize + ?Sized,
    {
        let uri = format!("{}{}", self.origin(), path);
        self.http_client.post(&uri).json(body).send().await.unwrap()
    }

    pub async fn post_without_body(&self, path: &str) -> reqwest::Response {
        let uri = format!("{}{}", self.origin(), path);
        self.http_client.post(&uri).send().await.unwrap()
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> reqwest::Response {
        let uri = format!("{}{}", self.origin(), path);
        self.http_client
            .post(&uri)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .unwrap()
    }
}
