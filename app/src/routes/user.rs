use axum::{Router, routing::get};

use infra::{
    AppState,
    http::handler::user::{by_key, list},
};

pub fn create_user_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{key}", get(by_key))
        .with_state(app_state)
}
