pub mod evaluation;
pub mod item;
pub mod parameter;
pub mod user;

use axum::{
    Router,
    routing::{get, post},
};

use infra::{
    AppState,
    http::handler::{background, health_check, root},
};

use crate::routes::{
    evaluation::create_evaluation_routes, item::create_item_routes,
    parameter::create_parameter_routes, user::create_user_routes,
};

/// ルーターを作成する。
///
/// # 引数
///
/// * `app_state`: アプリケーションの状態
pub fn create_router(app_state: AppState) -> Router {
    axum::Router::new()
        .route("/", get(root))
        .route("/health-check", get(health_check))
        .route("/background_task", post(background::run))
        .merge(create_parameter_routes())
        .nest("/db", create_item_routes(app_state.clone()))
        .nest("/users", create_user_routes(app_state.clone()))
        .nest("/evaluation", create_evaluation_routes(app_state.clone()))
        .with_state(app_state)
}
