//! HTTP-backed text extraction.

use super::{DocumentKind, TextExtractor, html_to_text};
use crate::error::{ExtractionError, Result};
use crate::text::tidy_text;
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info};

/// Default request timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on downloaded bytes (25 MiB).
pub const DEFAULT_MAX_DOWNLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Settings for [`HttpExtractor`].
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Largest body accepted.
    pub max_bytes: usize,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            max_bytes: DEFAULT_MAX_DOWNLOAD_BYTES,
            user_agent: format!("paper-digest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetches documents over HTTP(S) and converts them to text.
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpExtractor {
    /// Builds an extractor with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Client`] if the TLS backend cannot be initialised.
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ExtractionError::Client(e.to_string()))?;
        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }

    /// Returns the `Content-Type`, the final URL after redirects, and the body.
    async fn fetch(
        &self,
        url: &str,
    ) -> std::result::Result<(Option<String>, String, Vec<u8>), ExtractionError> {
        let fetch_err = |e: reqwest::Error| ExtractionError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let mut response = self.client.get(url).send().await.map_err(fetch_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let too_large = || ExtractionError::TooLarge {
            url: url.to_string(),
            limit: self.max_bytes,
        };
        if response
            .content_length()
            .is_some_and(|len| usize::try_from(len).map_or(true, |len| len > self.max_bytes))
        {
            return Err(too_large());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let final_url = response.url().to_string();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(fetch_err)? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok((content_type, final_url, body))
    }
}

#[async_trait]
impl TextExtractor for HttpExtractor {
    async fn extract(&self, url: &str) -> Result<String> {
        let target = resolve_document_url(url);
        if target != url {
            debug!(%url, %target, "rewrote document URL");
        }

        let (content_type, final_url, body) = self.fetch(&target).await?;
        let kind = DocumentKind::detect(content_type.as_deref(), &final_url, &body);

        let text = match kind {
            DocumentKind::Pdf => pdf_to_text(body).await?,
            DocumentKind::Html => html_to_text(&String::from_utf8_lossy(&body)),
            DocumentKind::Text => tidy_text(&String::from_utf8_lossy(&body)),
        };

        info!(url = %target, ?kind, chars = text.chars().count(), "extracted document text");
        Ok(text)
    }
}

async fn pdf_to_text(body: Vec<u8>) -> std::result::Result<String, ExtractionError> {
    let text = parse_off_runtime(move || Ok(pdf_extract::extract_text_from_mem(&body)?)).await?;
    Ok(tidy_text(&text))
}

/// Runs a CPU-bound parser on the blocking pool. A panic in the parser
/// unwinds that thread only and is reported as [`ExtractionError::Pdf`].
async fn parse_off_runtime<F>(parse: F) -> std::result::Result<String, ExtractionError>
where
    F: FnOnce() -> std::result::Result<String, ExtractionError> + Send + 'static,
{
    tokio::task::spawn_blocking(parse).await.map_err(|e| {
        if e.is_panic() {
            ExtractionError::Pdf("parser crashed on this document".to_string())
        } else {
            ExtractionError::Pdf(e.to_string())
        }
    })?
}

/// Maps landing-page URLs to the URL of the document itself.
///
/// arXiv abstract pages (`/abs/<id>`) only carry the abstract, so they are
/// rewritten to the PDF (`/pdf/<id>`). Anything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use paper_digest::extract::resolve_document_url;
///
/// assert_eq!(
///     resolve_document_url("https://arxiv.org/abs/1706.03762v7"),
///     "https://arxiv.org/pdf/1706.03762v7"
/// );
/// assert_eq!(resolve_document_url("https://example.org/a"), "https://example.org/a");
/// ```
#[must_use]
pub fn resolve_document_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let is_arxiv = parsed
        .host_str()
        .is_some_and(|host| host == "arxiv.org" || host.ends_with(".arxiv.org"));
    if !is_arxiv {
        return url.to_string();
    }
    let Some(id) = parsed.path().strip_prefix("/abs/").map(String::from) else {
        return url.to_string();
    };
    parsed.set_path(&format!("/pdf/{id}"));
    parsed.set_query(None);
    parsed.set_fragment(None);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::{Body, Bytes};
    use axum::http::{StatusCode, header};
    use axum::routing::get;
    use futures_util::stream;

    const LIMIT: usize = 256;
    const PAGE: &str = "<html><head><title>Skip</title></head><body><h1>Attention</h1>\
        <script>var hidden = 1;</script><p>Queries &amp; keys</p></body></html>";

    /// Serves one fixture per extraction branch and returns the base URL.
    async fn fixture_server() -> String {
        let app = Router::new()
            .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "gone") }))
            .route("/big", get(|| async { "x".repeat(LIMIT * 4) }))
            .route(
                "/stream",
                get(|| async {
                    let parts = (0..8).map(|_| Ok::<_, std::io::Error>(Bytes::from_static(&[b'y'; 64])));
                    Body::from_stream(stream::iter(parts))
                }),
            )
            .route(
                "/page",
                get(|| async { ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], PAGE) }),
            )
            .route(
                "/notes",
                get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "line one\n\n\n\nline two  \n") }),
            )
            .route(
                "/broken.pdf",
                get(|| async {
                    (
                        [(header::CONTENT_TYPE, "application/pdf")],
                        &b"%PDF-1.4\nnot really a pdf\n%%EOF\n"[..],
                    )
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn limited_extractor() -> HttpExtractor {
        HttpExtractor::new(&ExtractorConfig {
            timeout: Duration::from_secs(5),
            max_bytes: LIMIT,
            ..ExtractorConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let base = fixture_server().await;
        let err = limited_extractor().extract(&format!("{base}/missing")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Extraction(ExtractionError::Status { status: 404, .. })
        ));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn test_declared_length_over_limit_is_rejected() {
        let base = fixture_server().await;
        let err = limited_extractor().extract(&format!("{base}/big")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Extraction(ExtractionError::TooLarge { limit: LIMIT, .. })
        ));
    }

    #[tokio::test]
    async fn test_streamed_body_over_limit_is_rejected() {
        let base = fixture_server().await;
        let err = limited_extractor().extract(&format!("{base}/stream")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Extraction(ExtractionError::TooLarge { limit: LIMIT, .. })
        ));
    }

    #[tokio::test]
    async fn test_html_body_is_converted() {
        let base = fixture_server().await;
        let text = limited_extractor().extract(&format!("{base}/page")).await.unwrap();
        assert_eq!(text, "Attention\nQueries & keys");
    }

    #[tokio::test]
    async fn test_plain_text_body_is_tidied() {
        let base = fixture_server().await;
        let text = limited_extractor().extract(&format!("{base}/notes")).await.unwrap();
        assert!(text.starts_with("line one"));
        assert!(text.ends_with("line two"));
        assert!(!text.contains("\n\n\n"));
    }

    #[tokio::test]
    async fn test_pdf_body_goes_to_pdf_parser() {
        let base = fixture_server().await;
        let outcome = limited_extractor().extract(&format!("{base}/broken.pdf")).await;
        // The parser either rejects the body or finds no text in it; the
        // bytes are never passed through as plain text
        match outcome {
            Err(err) => assert!(matches!(err, crate::Error::Extraction(ExtractionError::Pdf(_)))),
            Ok(text) => assert!(!text.contains("not really a pdf")),
        }
    }

    #[tokio::test]
    #[allow(clippy::panic)]
    async fn test_parser_panic_becomes_pdf_error() {
        let err = parse_off_runtime(|| panic!("malformed cross-reference table"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_resolve_arxiv_abs() {
        assert_eq!(
            resolve_document_url("https://arxiv.org/abs/2401.00001"),
            "https://arxiv.org/pdf/2401.00001"
        );
        assert_eq!(
            resolve_document_url("http://export.arxiv.org/abs/2401.00001?context=cs#x"),
            "http://export.arxiv.org/pdf/2401.00001"
        );
    }

    #[test]
    fn test_resolve_leaves_other_urls() {
        for url in [
            "https://arxiv.org/pdf/2401.00001",
            "https://notarxiv.org/abs/1",
            "https://example.org/abs/1",
            "not a url",
        ] {
            assert_eq!(resolve_document_url(url), url);
        }
    }

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.timeout, DEFAULT_FETCH_TIMEOUT);
        assert_eq!(config.max_bytes, DEFAULT_MAX_DOWNLOAD_BYTES);
        assert!(config.user_agent.starts_with("paper-digest/"));
    }

    #[test]
    fn test_build_extractor() {
        assert!(HttpExtractor::new(&ExtractorConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let extractor = HttpExtractor::new(&ExtractorConfig {
            timeout: Duration::from_secs(2),
            ..ExtractorConfig::default()
        })
        .unwrap();
        // Port 9 on localhost is the discard port and is essentially never open
        let err = extractor.extract("http://127.0.0.1:9/paper.pdf").await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Extraction(ExtractionError::Fetch { .. })
        ));
    }
}
