pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cv::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV data (load / save)
        .route(
            "/api/v1/cv",
            get(handlers::handle_get_cv).put(handlers::handle_save_cv),
        )
        // Parse-only validation
        .route("/api/v1/cv/validate", post(handlers::handle_validate))
        // PDF export
        .route("/api/v1/cv/export", post(handlers::handle_export))
        .with_state(state)
}
