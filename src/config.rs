//! Runtime configuration.
//!
//! [`AppConfig`] is assembled from command-line flags and environment
//! variables by [`crate::cli::Cli::config`] and checked once at startup.

use crate::error::{Error, Result};
use crate::extract::ExtractorConfig;
use crate::llm::OpenAiConfig;
use crate::web::WebSettings;

/// Everything needed to run a command.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Language model connection.
    pub openai: OpenAiConfig,
    /// Document fetching.
    pub extractor: ExtractorConfig,
    /// Request handling and summarization.
    pub web: WebSettings,
}

impl AppConfig {
    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rejects values the server cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(config_error("host must not be empty"));
        }
        if self.port == 0 {
            return Err(config_error("port must be > 0"));
        }
        if self.openai.model.trim().is_empty() {
            return Err(config_error("model name must not be empty"));
        }
        if !self.openai.base_url.starts_with("http://") && !self.openai.base_url.starts_with("https://") {
            return Err(config_error(format!(
                "base URL must be http(s): {}",
                self.openai.base_url
            )));
        }
        if self.extractor.timeout.is_zero() {
            return Err(config_error("fetch timeout must be > 0"));
        }
        if self.extractor.max_bytes == 0 {
            return Err(config_error("max download bytes must be > 0"));
        }
        if self.web.chat_context_chars == 0 {
            return Err(config_error("chat context chars must be > 0"));
        }
        if self.web.min_text_chars == 0 {
            return Err(config_error("min text chars must be > 0"));
        }
        self.web.summary.validate().map_err(|err| match err {
            Error::Config { .. } => err,
            other => config_error(other.to_string()),
        })
    }
}

fn config_error(message: impl Into<String>) -> Error {
    Error::Config {
        message: message.into(),
    }
}
