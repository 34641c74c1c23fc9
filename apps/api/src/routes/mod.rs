pub mod health;

use axum::{routing::get, Router};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendations",
            get(handlers::handle_recommended),
        )
        .route(
            "/api/v1/recommendations/scored",
            get(handlers::handle_recommended_scored),
        )
        .with_state(state)
}
