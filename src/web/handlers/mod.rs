//! Route handlers.

pub mod chat;
pub mod summarize;

use super::AppState;
use super::page::{PageView, render};
use axum::Json;
use axum::extract::State;
use axum::response::Html;
use serde_json::{Value, json};
use std::sync::Arc;

/// `GET /`
pub async fn index() -> Html<String> {
    Html(render(&PageView::default()))
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "documents": state.documents.len(),
        "conversations": state.chats.len(),
    }))
}
