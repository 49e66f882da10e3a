use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/schema", get(handlers::schema_info))
        .route("/quick", post(handlers::quick_handler))
        .route("/analyze", post(handlers::analyze_handler))
        .route("/creative-html", post(handlers::creative_html_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
