use axum::{
    Router,
    routing::{get, post},
};

use infra::{
    AppState,
    http::handler::evaluation::{confusion_matrix, loss_curves},
};

pub fn create_evaluation_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/runs/{run_id}/loss-curves", get(loss_curves))
        .route("/confusion-matrix", post(confusion_matrix))
        .with_state(app_state)
}
