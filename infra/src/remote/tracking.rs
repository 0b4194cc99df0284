use std::{collections::HashSet, time::Duration};

use reqwest::Client;
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use time::OffsetDateTime;

use domain::{
    DomainErrorKind, DomainResult, domain_error, models::MetricPoint,
    repositories::MetricHistoryRepository,
};

/// メトリクス履歴を返すMLflow REST APIのパス
const GET_METRIC_HISTORY_PATH: &str = "/api/2.0/mlflow/metrics/get-history";

/// MLflowトラッキングサーバーからメトリクスの履歴を取得するリポジトリ
///
/// 履歴がページに分割されている場合は、すべてのページを取得する。
pub struct MlflowMetricHistoryRepository {
    client: Client,
    uri: String,
    timeout: Duration,
    max_results: u32,
    token: Option<SecretString>,
}

impl MlflowMetricHistoryRepository {
    /// # 引数
    ///
    /// * `client` - HTTPクライアント
    /// * `uri` - トラッキングサーバーのURI
    /// * `timeout` - リクエストタイムアウト
    /// * `max_results` - 1ページあたりの最大件数
    /// * `token` - Bearerトークン
    pub fn new(
        client: Client,
        uri: impl Into<String>,
        timeout: Duration,
        max_results: u32,
        token: Option<SecretString>,
    ) -> Self {
        Self {
            client,
            uri: uri.into(),
            timeout,
            max_results: max_results.max(1),
            token,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.uri.trim_end_matches('/'),
            GET_METRIC_HISTORY_PATH
        )
    }

    async fn fetch_page(
        &self,
        run_id: &str,
        key: &str,
        page_token: Option<&str>,
    ) -> DomainResult<MetricHistoryPage> {
        let mut query = vec![
            ("run_id", run_id.to_string()),
            ("metric_key", key.to_string()),
            ("max_results", self.max_results.to_string()),
        ];
        if let Some(page_token) = page_token {
            query.push(("page_token", page_token.to_string()));
        }
        let mut request = self
            .client
            .get(self.endpoint())
            .query(&query)
            .timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(remote_error)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "metric history request failed");
            return Err(domain_error(
                DomainErrorKind::Remote,
                format!("Error: {}", status.as_u16()),
            ));
        }
        response
            .json::<MetricHistoryPage>()
            .await
            .map_err(remote_error)
    }
}

#[async_trait::async_trait]
impl MetricHistoryRepository for MlflowMetricHistoryRepository {
    #[tracing::instrument(skip(self))]
    async fn history(&self, run_id: &str, key: &str) -> DomainResult<Vec<MetricPoint>> {
        let mut points: Vec<MetricPoint> = vec![];
        let mut page_token: Option<String> = None;
        // 一度使用したページトークンが再び返された場合は、巡回しているため打ち切る
        let mut seen_tokens = HashSet::new();
        loop {
            let page = self.fetch_page(run_id, key, page_token.as_deref()).await?;
            for metric in page.metrics {
                points.push(MetricPoint::try_from(metric)?);
            }
            match page.next_page_token {
                Some(token) if !token.is_empty() && seen_tokens.insert(token.clone()) => {
                    page_token = Some(token);
                }
                Some(token) if !token.is_empty() => {
                    tracing::warn!(page_token = %token, "metric history page token repeated");
                    break;
                }
                _ => break,
            }
        }
        Ok(points)
    }
}

fn remote_error(e: reqwest::Error) -> domain::DomainError {
    let mut error = domain_error(DomainErrorKind::Remote, e.to_string());
    error.source = e.into();
    error
}

#[derive(Debug, Deserialize)]
struct MetricHistoryPage {
    #[serde(default)]
    metrics: Vec<MetricDto>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricDto {
    value: f64,
    /// UNIXエポックからのミリ秒
    timestamp: i64,
    #[serde(default)]
    step: i64,
}

impl TryFrom<MetricDto> for MetricPoint {
    type Error = domain::DomainError;

    fn try_from(dto: MetricDto) -> Result<Self, Self::Error> {
        let nanos = i128::from(dto.timestamp) * 1_000_000;
        let timestamp = OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|e| {
            domain_error(
                DomainErrorKind::Remote,
                format!("invalid metric timestamp: {}", e),
            )
        })?;
        Ok(MetricPoint {
            step: dto.step,
            value: dto.value,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
    };
    use time::macros::datetime;

    use crate::remote::testing::spawn_stub;

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// 2ページに分割した`train_loss`の履歴を返すスタブ
    async fn get_history(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> axum::response::Response {
        if let Some(auth) = headers.get("authorization") {
            if auth != "Bearer secret" {
                return StatusCode::UNAUTHORIZED.into_response();
            }
        }
        if params.get("run_id").map(String::as_str) != Some("run-1") {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error_code": "RESOURCE_DOES_NOT_EXIST"})),
            )
                .into_response();
        }
        if params.get("metric_key").map(String::as_str) != Some("train_loss") {
            return Json(serde_json::json!({})).into_response();
        }
        match params.get("page_token").map(String::as_str) {
            None => Json(serde_json::json!({
                "metrics": [
                    {"key": "train_loss", "value": 0.9, "timestamp": 1735689600000i64, "step": 0},
                    {"key": "train_loss", "value": 0.5, "timestamp": 1735689601000i64, "step": 1}
                ],
                "next_page_token": "page-2"
            }))
            .into_response(),
            Some("page-2") => Json(serde_json::json!({
                "metrics": [
                    {"key": "train_loss", "value": 0.3, "timestamp": 1735689602000i64, "step": 2}
                ]
            }))
            .into_response(),
            Some(_) => StatusCode::BAD_REQUEST.into_response(),
        }
    }

    async fn tracking_stub() -> String {
        let router = Router::new().route(GET_METRIC_HISTORY_PATH, get(get_history));
        spawn_stub(router).await
    }

    #[tokio::test]
    async fn history_follows_pages() {
        let uri = tracking_stub().await;
        let repo = MlflowMetricHistoryRepository::new(Client::new(), uri, TIMEOUT, 2, None);

        let points = repo.history("run-1", "train_loss").await.unwrap();

        let values = points.iter().map(|p| (p.step, p.value)).collect::<Vec<_>>();
        assert_eq!(values, vec![(0, 0.9), (1, 0.5), (2, 0.3)]);
        assert_eq!(points[0].timestamp, datetime!(2025-01-01 00:00:00 UTC));
    }

    /// `page-a`と`page-b`を交互に返し続けるスタブ
    async fn get_cyclic_history(
        Query(params): Query<HashMap<String, String>>,
    ) -> axum::response::Response {
        let next_page_token = match params.get("page_token").map(String::as_str) {
            Some("page-a") => "page-b",
            _ => "page-a",
        };
        Json(serde_json::json!({
            "metrics": [
                {"key": "train_loss", "value": 0.1, "timestamp": 1735689600000i64, "step": 0}
            ],
            "next_page_token": next_page_token
        }))
        .into_response()
    }

    #[tokio::test]
    async fn history_stops_when_page_tokens_cycle() {
        let router = Router::new().route(GET_METRIC_HISTORY_PATH, get(get_cyclic_history));
        let uri = spawn_stub(router).await;
        let repo = MlflowMetricHistoryRepository::new(Client::new(), uri, TIMEOUT, 1, None);

        let points = tokio::time::timeout(TIMEOUT, repo.history("run-1", "train_loss"))
            .await
            .expect("pagination did not terminate")
            .unwrap();

        // 1ページ目、page-a、page-bの3ページを取得した時点で、page-aの再出現により打ち切る
        assert_eq!(points.len(), 3);
    }

    #[tokio::test]
    async fn history_is_empty_when_metric_is_missing() {
        let uri = tracking_stub().await;
        let repo = MlflowMetricHistoryRepository::new(Client::new(), uri, TIMEOUT, 100, None);

        let points = repo.history("run-1", "validation_loss").await.unwrap();

        assert!(points.is_empty());
    }

    #[tokio::test]
    async fn history_sends_bearer_token() {
        let uri = tracking_stub().await;
        let repo = MlflowMetricHistoryRepository::new(
            Client::new(),
            format!("{}/", uri),
            TIMEOUT,
            100,
            Some(SecretString::new("secret".into())),
        );

        assert_eq!(repo.history("run-1", "train_loss").await.unwrap().len(), 3);

        let repo = MlflowMetricHistoryRepository::new(
            Client::new(),
            tracking_stub().await,
            TIMEOUT,
            100,
            Some(SecretString::new("wrong".into())),
        );
        let error = repo.history("run-1", "train_loss").await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Remote);
        assert_eq!(error.to_string(), "Error: 401");
    }

    #[tokio::test]
    async fn history_fails_on_unknown_run() {
        let uri = tracking_stub().await;
        let repo = MlflowMetricHistoryRepository::new(Client::new(), uri, TIMEOUT, 100, None);

        let error = repo.history("missing", "train_loss").await.unwrap_err();

        assert_eq!(error.kind, DomainErrorKind::Remote);
        assert_eq!(error.to_string(), "Error: 404");
    }

    #[test]
    fn metric_dto_defaults_step_to_zero() {
        let dto = serde_json::from_str::<MetricDto>(
            r#"{"key":"train_loss","value":1.5,"timestamp":0}"#,
        )
        .unwrap();
        let point = MetricPoint::try_from(dto).unwrap();
        assert_eq!(point.step, 0);
        assert_eq!(point.timestamp, OffsetDateTime::UNIX_EPOCH);
    }
}
