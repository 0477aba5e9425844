//! Route table.

use super::AppState;
use super::handlers;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// All routes, with state attached.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/summarize", post(handlers::summarize::summarize))
        .route("/chat", post(handlers::chat::chat))
        .route("/health", get(handlers::health))
        .with_state(state)
}
