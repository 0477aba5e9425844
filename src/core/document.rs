//! Extracted documents and their per-level summaries.

use super::SummaryLevel;
use std::collections::HashMap;
use std::sync::Arc;

/// A fetched document with the summaries generated for it so far.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source URL.
    pub url: String,
    /// Extracted plain text.
    pub text: Arc<str>,
    /// Summaries keyed by level.
    pub summaries: HashMap<SummaryLevel, String>,
}

impl Document {
    /// Creates a document with no summaries.
    #[must_use]
    pub fn new(url: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            summaries: HashMap::new(),
        }
    }

    /// Returns the cached summary for `level`, if any.
    #[must_use]
    pub fn summary(&self, level: SummaryLevel) -> Option<&str> {
        self.summaries.get(&level).map(String::as_str)
    }
}

/// Returns true when `text`, once trimmed, is non-empty and at least `min_chars` characters long.
#[must_use]
pub fn has_enough_text(text: &str, min_chars: usize) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= min_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_no_summaries() {
        let doc = Document::new("https://example.org", "body");
        assert!(doc.summary(SummaryLevel::Low).is_none());
        assert_eq!(&*doc.text, "body");
    }

    #[test]
    fn test_has_enough_text() {
        assert!(!has_enough_text("", 0));
        assert!(!has_enough_text("   \n ", 0));
        assert!(!has_enough_text(&"x".repeat(199), 200));
        assert!(has_enough_text(&"x".repeat(200), 200));
        // Surrounding whitespace does not count
        let padded = format!("   {}   ", "x".repeat(199));
        assert!(!has_enough_text(&padded, 200));
    }

    #[test]
    fn test_has_enough_text_counts_chars_not_bytes() {
        let text = "é".repeat(150); // 300 bytes, 150 chars
        assert!(!has_enough_text(&text, 200));
    }
}
