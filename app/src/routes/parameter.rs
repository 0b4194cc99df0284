use axum::{Router, routing::get};

use infra::{
    AppState,
    http::handler::parameter::{
        about, path_parameter, predefined_path_parameter, query_parameters,
    },
};

pub fn create_parameter_routes() -> Router<AppState> {
    Router::new()
        .route("/path_parameters/about", get(about))
        .route("/path_parameters/{p}", get(path_parameter))
        .route(
            "/predefined_path_parameters/{p}",
            get(predefined_path_parameter),
        )
        .route("/query_parameters", get(query_parameters))
}
