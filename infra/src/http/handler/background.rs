use axum::{Json, extract::State};

use super::MessageResponseBody;
use crate::AppState;

/// バックグラウンドタスクを開始するハンドラ
///
/// タスクの完了を待たずにレスポンスを返す。
#[tracing::instrument(skip(app_state))]
pub async fn run(State(app_state): State<AppState>) -> Json<MessageResponseBody> {
    app_state.background_tasks.spawn_fake_task();
    Json(MessageResponseBody::new("Background task started"))
}
