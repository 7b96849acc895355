pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::agent::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/agent", get(handlers::handle_agent_manifest))
        .route("/api/v1/screenplay", post(handlers::handle_screenplay))
        .route("/api/v1/format", post(handlers::handle_format))
        .fallback(not_found)
        .with_state(state)
}
