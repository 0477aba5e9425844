//! Content sniffing for fetched documents.

/// How a fetched body should be turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF bytes.
    Pdf,
    /// HTML markup.
    Html,
    /// Anything else, decoded as UTF-8.
    Text,
}

impl DocumentKind {
    /// Detects the kind from the `Content-Type` header, the final URL, and
    /// the first bytes of the body.
    ///
    /// The header wins when it is specific; generic types such as
    /// `application/octet-stream` fall back to the URL suffix and the
    /// `%PDF-` magic.
    ///
    /// # Examples
    ///
    /// ```
    /// use paper_digest::extract::DocumentKind;
    ///
    /// let kind = DocumentKind::detect(Some("text/html; charset=utf-8"), "https://a.org/", b"<html>");
    /// assert_eq!(kind, DocumentKind::Html);
    /// ```
    #[must_use]
    pub fn detect(content_type: Option<&str>, url: &str, body: &[u8]) -> Self {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if mime == "application/pdf" || body.starts_with(b"%PDF-") {
            return Self::Pdf;
        }
        if mime == "text/html" || mime == "application/xhtml+xml" {
            return Self::Html;
        }
        if mime.starts_with("text/") || mime.ends_with("+json") || mime == "application/json" {
            return Self::Text;
        }

        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .to_ascii_lowercase();
        if path.ends_with(".pdf") {
            return Self::Pdf;
        }
        if path.ends_with(".html") || path.ends_with(".htm") || looks_like_html(body) {
            return Self::Html;
        }
        Self::Text
    }
}

fn looks_like_html(body: &[u8]) -> bool {
    let head = &body[..body.len().min(512)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let head = head.trim_start();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}
