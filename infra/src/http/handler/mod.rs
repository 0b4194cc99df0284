pub mod background;
pub mod evaluation;
pub mod item;
pub mod parameter;
pub mod user;

use axum::Json;
use serde::{Deserialize, Serialize};

/// メッセージのみを持つレスポンスボディ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponseBody {
    pub message: String,
}

impl MessageResponseBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// ルートハンドラ
#[tracing::instrument()]
pub async fn root() -> Json<MessageResponseBody> {
    Json(MessageResponseBody::new("Hello World"))
}

/// ヘルスチェックハンドラ
#[tracing::instrument()]
pub async fn health_check() -> &'static str {
    "Ok, the server is running!"
}
