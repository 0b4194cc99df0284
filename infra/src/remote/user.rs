use std::time::Duration;

use reqwest::{Client, StatusCode};

use domain::{
    models::User,
    repositories::{RemoteUserListError, RemoteUserRepository},
};

/// HTTPでユーザーの一覧を取得するリモートユーザーリポジトリ
///
/// ステータスコードが200の場合のみ成功とみなし、それ以外はステータスコードを持つエラーを返す。
pub struct HttpRemoteUserRepository {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpRemoteUserRepository {
    /// # 引数
    ///
    /// * `client` - HTTPクライアント
    /// * `url` - ユーザーの一覧を返すURL
    /// * `timeout` - リクエストタイムアウト
    pub fn new(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl RemoteUserRepository for HttpRemoteUserRepository {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn list(&self) -> Result<Vec<User>, RemoteUserListError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RemoteUserListError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "remote user list request failed");
            return Err(RemoteUserListError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteUserListError::Transport(e.to_string()))?;
        serde_json::from_slice::<Vec<User>>(&body)
            .map_err(|e| RemoteUserListError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Router, routing::get};

    use crate::remote::testing::spawn_stub;

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// 指定したステータスコードとボディを返し、リクエストの回数を数えるスタブサーバーを起動する。
    async fn users_stub(status: StatusCode, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let router = Router::new().route(
            "/users",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, body)
                }
            }),
        );
        let origin = spawn_stub(router).await;
        (format!("{}/users", origin), hits)
    }

    #[tokio::test]
    async fn list_returns_users_on_200() {
        let (url, hits) = users_stub(StatusCode::OK, r#"[{"name":"John","surname":"Doe"}]"#).await;
        let repo = HttpRemoteUserRepository::new(Client::new(), url, TIMEOUT);

        let users = repo.list().await.unwrap();

        assert_eq!(users, vec![User::new("John", "Doe")]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[rstest::rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::NOT_FOUND)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(StatusCode::CREATED)]
    #[tokio::test]
    async fn list_fails_with_status_on_non_200(#[case] status: StatusCode) {
        let (url, hits) = users_stub(status, r#"[{"name":"John","surname":"Doe"}]"#).await;
        let repo = HttpRemoteUserRepository::new(Client::new(), url, TIMEOUT);

        let error = repo.list().await.unwrap_err();

        assert_eq!(error, RemoteUserListError::Status(status.as_u16()));
        assert_eq!(hits.load(Ordering::SeqCst), 1, "no retry is expected");
    }

    #[rstest::rstest]
    #[case("not json")]
    #[case(r#"{"name":"John","surname":"Doe"}"#)]
    #[case(r#"[{"name":"John"}]"#)]
    #[tokio::test]
    async fn list_fails_with_decode_error_on_malformed_body(#[case] body: &'static str) {
        let (url, _) = users_stub(StatusCode::OK, body).await;
        let repo = HttpRemoteUserRepository::new(Client::new(), url, TIMEOUT);

        let error = repo.list().await.unwrap_err();

        assert!(matches!(error, RemoteUserListError::Decode(_)), "{:?}", error);
    }

    #[tokio::test]
    async fn list_sends_exactly_one_request_per_call() {
        let (url, hits) = users_stub(StatusCode::OK, "[]").await;
        let repo = HttpRemoteUserRepository::new(Client::new(), url, TIMEOUT);

        for expected in 1..=3 {
            assert!(repo.list().await.unwrap().is_empty());
            assert_eq!(hits.load(Ordering::SeqCst), expected);
        }
    }

    #[tokio::test]
    async fn list_fails_with_transport_error_on_timeout() {
        let router = Router::new().route(
            "/users",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "[]"
            }),
        );
        let origin = spawn_stub(router).await;
        let repo = HttpRemoteUserRepository::new(
            Client::new(),
            format!("{}/users", origin),
            Duration::from_millis(100),
        );

        let error = repo.list().await.unwrap_err();

        assert!(matches!(error, RemoteUserListError::Transport(_)), "{:?}", error);
    }
}
