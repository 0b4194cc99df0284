pub mod handler;

use std::borrow::Cow;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use domain::{DomainError, DomainErrorKind, repositories::RemoteUserListError};

/// API結果
type ApiResult<T> = Result<T, ApiError>;

/// APIエラー
#[derive(Debug)]
pub struct ApiError {
    /// HTTPステータスコード
    pub status_code: StatusCode,
    /// エラーメッセージ
    pub messages: Vec<Cow<'static, str>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "messages": self.messages,
        });
        (self.status_code, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let status_code = match error.kind {
            DomainErrorKind::Validation => StatusCode::BAD_REQUEST,
            DomainErrorKind::NotFound => StatusCode::NOT_FOUND,
            DomainErrorKind::Remote => StatusCode::BAD_GATEWAY,
            DomainErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status_code,
            messages: error.messages,
        }
    }
}

impl From<RemoteUserListError> for ApiError {
    fn from(error: RemoteUserListError) -> Self {
        Self {
            status_code: StatusCode::BAD_GATEWAY,
            messages: vec![error.to_string().into()],
        }
    }
}

pub fn bad_request(message: Cow<'static, str>) -> ApiError {
    ApiError {
        status_code: StatusCode::BAD_REQUEST,
        messages: vec![message],
    }
}

pub fn not_found(name: &str) -> ApiError {
    ApiError {
        status_code: StatusCode::NOT_FOUND,
        messages: vec![format!("{} not found", name).into()],
    }
}
