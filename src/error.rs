//! Error types for paper-digest operations.
//!
//! This module provides the error hierarchy using `thiserror` for text
//! extraction, language model calls, chunking, request validation, and
//! configuration.

use thiserror::Error;

/// Result type alias for paper-digest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Document fetching or text extraction errors.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Language model errors.
    #[error("language model error: {0}")]
    Llm(#[from] LlmError),

    /// Chunking-related errors (text processing).
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Invalid client input.
    #[error("{0}")]
    Request(#[from] RequestError),

    /// I/O errors (sockets, stdout).
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Errors raised while fetching a URL and turning it into plain text.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Transport-level failure (DNS, TLS, timeout, ...).
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        /// URL that was requested.
        url: String,
        /// Underlying failure.
        reason: String,
    },

    /// Server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Response body exceeds the configured limit.
    #[error("document at {url} is larger than {limit} bytes")]
    TooLarge {
        /// URL that was requested.
        url: String,
        /// Configured byte limit.
        limit: usize,
    },

    /// PDF could not be decoded.
    #[error("failed to read PDF: {0}")]
    Pdf(String),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Errors raised by the language model layer.
#[derive(Error, Debug)]
pub enum LlmError {
    /// API key is missing.
    #[error("no API key configured (set OPENAI_API_KEY)")]
    MissingApiKey,

    /// Request could not be built or the API returned an error.
    #[error("API request failed: {0}")]
    Api(String),

    /// The model returned no usable text.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// Chat was requested without any turns.
    #[error("chat history is empty")]
    EmptyHistory,

    /// A map task panicked or was cancelled.
    #[error("summary task failed: {0}")]
    Task(String),
}

/// Chunking-specific errors for text processing.
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// Chunk size exceeds maximum allowed.
    #[error("chunk size {size} exceeds maximum {max}")]
    ChunkTooLarge {
        /// Actual chunk size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// Invalid chunk configuration.
    #[error("invalid chunk configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },

    /// Overlap exceeds chunk size.
    #[error("overlap {overlap} must be less than chunk size {size}")]
    OverlapTooLarge {
        /// Overlap size.
        overlap: usize,
        /// Chunk size.
        size: usize,
    },
}

/// Client input errors surfaced to the page or the chat API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// URL is not http(s).
    #[error("Please enter a valid http(s) URL.")]
    InvalidUrl,

    /// Extracted text is empty or too short to summarize.
    #[error("Could not extract enough text from the provided URL.")]
    NotEnoughText,

    /// Chat request lacks a URL or a message.
    #[error("Missing url or message")]
    MissingChatFields,

    /// Chat requested for a document that was never summarized.
    #[error("Please summarize the paper first.")]
    NotSummarized,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for LlmError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Self::Api(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for Error {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Self::Llm(err.into())
    }
}

impl From<pdf_extract::OutputError> for ExtractionError {
    fn from(err: pdf_extract::OutputError) -> Self {
        Self::Pdf(err.to_string())
    }
}

impl From<tokio::task::JoinError> for LlmError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_messages_are_user_facing() {
        assert_eq!(
            RequestError::InvalidUrl.to_string(),
            "Please enter a valid http(s) URL."
        );
        assert_eq!(
            RequestError::NotEnoughText.to_string(),
            "Could not extract enough text from the provided URL."
        );
        assert_eq!(
            RequestError::MissingChatFields.to_string(),
            "Missing url or message"
        );
        assert_eq!(
            RequestError::NotSummarized.to_string(),
            "Please summarize the paper first."
        );
    }

    #[test]
    fn test_request_error_is_not_prefixed() {
        let err: Error = RequestError::InvalidUrl.into();
        assert_eq!(err.to_string(), "Please enter a valid http(s) URL.");
    }

    #[test]
    fn test_extraction_error_display() {
        let err = ExtractionError::Status {
            url: "https://example.org/x".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "HTTP 404 fetching https://example.org/x");

        let err = ExtractionError::TooLarge {
            url: "https://example.org/big.pdf".to_string(),
            limit: 10,
        };
        assert!(err.to_string().contains("larger than 10 bytes"));
    }

    #[test]
    fn test_llm_error_display() {
        assert_eq!(
            LlmError::EmptyResponse.to_string(),
            "model returned an empty response"
        );
        let err: Error = LlmError::Api("rate limited".to_string()).into();
        assert_eq!(
            err.to_string(),
            "language model error: API request failed: rate limited"
        );
    }

    #[test]
    fn test_chunking_error_display() {
        let err = ChunkingError::OverlapTooLarge {
            overlap: 100,
            size: 50,
        };
        assert_eq!(
            err.to_string(),
            "overlap 100 must be less than chunk size 50"
        );

        let err = ChunkingError::ChunkTooLarge { size: 9, max: 8 };
        assert_eq!(err.to_string(), "chunk size 9 exceeds maximum 8");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("port taken"));
    }

    #[test]
    fn test_error_config() {
        let err = Error::Config {
            message: "bad config".to_string(),
        };
        assert_eq!(err.to_string(), "configuration error: bad config");
    }

    #[test]
    fn test_from_openai_error() {
        let err: Error = async_openai::error::OpenAIError::InvalidArgument("no model".to_string()).into();
        assert!(matches!(err, Error::Llm(LlmError::Api(_))));
    }
}
