//! Document text extraction.
//!
//! Turns a URL into plain text the language model can read. The web layer
//! only sees the [`TextExtractor`] trait; [`HttpExtractor`] is the default
//! implementation that fetches over HTTP and understands PDF, HTML, and
//! plain text bodies.

pub mod html;
pub mod http;
pub mod kind;

pub use html::{decode_entities, html_to_text};
pub use http::{ExtractorConfig, HttpExtractor, resolve_document_url};
pub use kind::DocumentKind;

use crate::error::Result;
use async_trait::async_trait;

/// Source of document text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Fetches `url` and returns its readable text.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or decoded.
    async fn extract(&self, url: &str) -> Result<String>;
}
