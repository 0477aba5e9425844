//! `POST /summarize`

use crate::core::{ChatKey, SummaryLevel};
use crate::error::{Error, RequestError, Result};
use crate::llm::summarize_map_reduce;
use crate::web::AppState;
use crate::web::page::{PageView, render};
use crate::web::session::SessionId;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Form fields posted by the page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizeForm {
    /// Document URL.
    pub paper_url: String,
    /// Requested level, parsed leniently.
    pub complexity: String,
}

impl Default for SummarizeForm {
    fn default() -> Self {
        Self {
            paper_url: String::new(),
            complexity: SummaryLevel::Low.as_str().to_string(),
        }
    }
}

/// Renders the page with a summary or an error. Always answers 200.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    form: std::result::Result<Form<SummarizeForm>, FormRejection>,
) -> Html<String> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let url = form.paper_url.trim();
    let level = SummaryLevel::parse(&form.complexity);

    let view = match summarize_document(&state, &session, url, level).await {
        Ok(summary) => PageView::summary(url, level, summary),
        Err(err) => {
            warn!(%url, %level, error = %err, "summarize failed");
            PageView::error(page_error(&err))
        }
    };
    Html(render(&view))
}

/// Extracts (or reuses) the document, then generates (or reuses) the summary
/// for `level`, and opens the chat history for this session.
async fn summarize_document(
    state: &AppState,
    session: &SessionId,
    url: &str,
    level: SummaryLevel,
) -> Result<String> {
    if !is_http_url(url) {
        return Err(RequestError::InvalidUrl.into());
    }

    let text = if let Some(text) = state.documents.text(url) {
        debug!(%url, "document cache hit");
        text
    } else {
        info!(%url, "extracting document");
        let text = state.extractor.extract(url).await?;
        if !state.settings.accepts_text(&text) {
            return Err(RequestError::NotEnoughText.into());
        }
        state.documents.insert_text(url, text)
    };

    let summary = if let Some(summary) = state.documents.summary(url, level) {
        debug!(%url, %level, "summary cache hit");
        summary
    } else {
        let summary =
            summarize_map_reduce(&state.model, &state.settings.summary, &text, level).await?;
        state.documents.store_summary(url, level, summary.clone());
        summary
    };

    state.chats.ensure(&ChatKey::new(session.as_str(), url));
    Ok(summary)
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Input problems are shown verbatim, failures are prefixed with `Error: `.
fn page_error(err: &Error) -> String {
    match err {
        Error::Request(request) => request.to_string(),
        other => format!("Error: {other}"),
    }
}
