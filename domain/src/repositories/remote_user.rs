use crate::models::User;

/// リモートユーザー一覧の取得エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteUserListError {
    /// リモートサービスが成功（200）以外のステータスコードを返した
    #[error("Error: {0}")]
    Status(u16),

    /// リクエストを送信できなかった、またはタイムアウトした
    #[error("Failed to send the request: {0}")]
    Transport(String),

    /// レスポンスボディをユーザーのリストとして解釈できなかった
    #[error("Failed to decode the response body: {0}")]
    Decode(String),
}

impl RemoteUserListError {
    /// リモートサービスが返したステータスコードを返す。
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// リモートユーザーリポジトリ
///
/// 1回の呼び出しにつき、リモートサービスにリクエストを1回だけ送信する。
/// キャッシュ及びリトライはしない。
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait RemoteUserRepository: Send + Sync {
    /// リモートサービスからユーザーのリストを取得する。
    async fn list(&self) -> Result<Vec<User>, RemoteUserListError>;
}
