pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assist::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assist API
        .route("/api/v1/modes", get(handlers::handle_list_modes))
        .route("/api/v1/assist", post(handlers::handle_assist))
        .route("/api/v1/assist/preview", post(handlers::handle_preview))
        // Upstream diagnostics
        .route("/api/v1/models", get(handlers::handle_list_models))
        .with_state(state)
}
