use axum::{Router, routing::post};

use infra::{
    AppState,
    http::handler::item::{create, read},
};

pub fn create_item_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/read", post(read))
        .with_state(app_state)
}
