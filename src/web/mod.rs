//! Web front-end.
//!
//! An axum application with four routes:
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /` | Main page |
//! | `POST /summarize` | Extract and summarize a document, render the page |
//! | `POST /chat` | JSON question/answer about a summarized document |
//! | `GET /health` | Liveness and cache sizes |
//!
//! Handlers depend on the [`TextExtractor`] and [`LanguageModel`] traits
//! only, so the whole application can be driven with fakes.

pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod session;

pub use error::{ApiError, ApiResult};
pub use page::{PageView, escape_html, render};
pub use session::{SESSION_COOKIE, SessionId, session_layer};

use crate::cache::{ChatStore, DocumentCache};
use crate::core::has_enough_text;
use crate::error::Result;
use crate::extract::TextExtractor;
use crate::llm::{DEFAULT_CHAT_CONTEXT_CHARS, LanguageModel, SummaryConfig};
use axum::Router;
use axum::middleware;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Default minimum number of characters an extracted document must have.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 200;

/// Request-handling settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSettings {
    /// Documents with fewer trimmed characters are rejected.
    pub min_text_chars: usize,
    /// Document characters embedded in chat prompts.
    pub chat_context_chars: usize,
    /// Map-reduce tuning.
    pub summary: SummaryConfig,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            chat_context_chars: DEFAULT_CHAT_CONTEXT_CHARS,
            summary: SummaryConfig::default(),
        }
    }
}

impl WebSettings {
    /// Returns true if `text` is long enough to summarize.
    #[must_use]
    pub fn accepts_text(&self, text: &str) -> bool {
        has_enough_text(text, self.min_text_chars)
    }
}

/// Shared application state.
pub struct AppState {
    /// URL -> extracted document and summaries.
    pub documents: DocumentCache,
    /// `(session, url)` -> chat turns.
    pub chats: ChatStore,
    /// Document text source.
    pub extractor: Arc<dyn TextExtractor>,
    /// Model used for summaries and chat.
    pub model: Arc<dyn LanguageModel>,
    /// Request-handling settings.
    pub settings: WebSettings,
}

impl AppState {
    /// Creates state with empty caches.
    #[must_use]
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        model: Arc<dyn LanguageModel>,
        settings: WebSettings,
    ) -> Self {
        Self {
            documents: DocumentCache::new(),
            chats: ChatStore::new(),
            extractor,
            model,
            settings,
        }
    }
}

/// Builds the router with session and tracing middleware.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(router::routes(state))
        .layer(middleware::from_fn(session_layer))
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let app = build_app(state);
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "could not listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = WebSettings::default();
        assert_eq!(settings.min_text_chars, 200);
        assert_eq!(settings.chat_context_chars, 60_000);
        assert!(!settings.accepts_text("too short"));
        assert!(settings.accepts_text(&"word ".repeat(50)));
    }
}
