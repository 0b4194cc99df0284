use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use domain::models::{User, UserKey};
use use_case::user::UserUseCase;

use crate::{
    AppState,
    http::{ApiError, ApiResult, bad_request},
    remote::HttpRemoteUserRepository,
};

/// ユーザーディレクトリからユーザーを取得するハンドラ
///
/// ユーザーが存在しない場合は`null`を返す。
#[tracing::instrument(skip(app_state))]
pub async fn by_key(
    State(app_state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Option<User>>> {
    let Path(key) = key.map_err(|e| bad_request(e.body_text().into()))?;
    let use_case = user_use_case(&app_state);
    Ok(Json(use_case.by_key(&UserKey::from(key))))
}

/// リモートサービスからユーザーの一覧を取得するハンドラ
#[tracing::instrument(skip(app_state))]
pub async fn list(State(app_state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let use_case = user_use_case(&app_state);
    let users = use_case.list_remote().await.map_err(ApiError::from)?;
    Ok(Json(users))
}

fn user_use_case(app_state: &AppState) -> UserUseCase<HttpRemoteUserRepository> {
    let settings = &app_state.app_settings.remote_users;
    let remote_repo = HttpRemoteUserRepository::new(
        app_state.http_client.clone(),
        settings.url.clone(),
        settings.timeout(),
    );
    UserUseCase::new(app_state.directory.clone(), remote_repo)
}
