//! Extracted documents keyed by URL.

use crate::core::{Document, SummaryLevel};
use dashmap::DashMap;
use std::sync::Arc;

/// URL -> [`Document`] cache.
///
/// Text is written once per URL: if two requests extract the same document
/// concurrently, the first insert wins and the second caller gets the stored
/// text back. Summaries are filled per level and the last write wins.
#[derive(Debug, Default)]
pub struct DocumentCache {
    documents: DashMap<String, Document>,
}

impl DocumentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `url` has been extracted.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.documents.contains_key(url)
    }

    /// Returns a snapshot of the document for `url`.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<Document> {
        self.documents.get(url).map(|doc| doc.value().clone())
    }

    /// Returns the extracted text for `url`.
    #[must_use]
    pub fn text(&self, url: &str) -> Option<Arc<str>> {
        self.documents.get(url).map(|doc| Arc::clone(&doc.text))
    }

    /// Stores extracted text unless the URL is already present, and returns
    /// the text that ends up cached.
    pub fn insert_text(&self, url: &str, text: impl Into<Arc<str>>) -> Arc<str> {
        let entry = self
            .documents
            .entry(url.to_string())
            .or_insert_with(|| Document::new(url, text));
        Arc::clone(&entry.text)
    }

    /// Returns the summary for `url` at `level`.
    #[must_use]
    pub fn summary(&self, url: &str, level: SummaryLevel) -> Option<String> {
        self.documents
            .get(url)
            .and_then(|doc| doc.summary(level).map(String::from))
    }

    /// Stores a summary. Returns false if `url` is not cached.
    pub fn store_summary(&self, url: &str, level: SummaryLevel, summary: impl Into<String>) -> bool {
        self.documents.get_mut(url).is_some_and(|mut doc| {
            doc.summaries.insert(level, summary.into());
            true
        })
    }

    /// Number of cached documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
