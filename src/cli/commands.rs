//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{OutputFormat, format_extract, format_summary};
use crate::cli::parser::{Cli, Commands};
use crate::config::AppConfig;
use crate::core::SummaryLevel;
use crate::error::{RequestError, Result};
use crate::extract::{HttpExtractor, TextExtractor};
use crate::llm::{LanguageModel, OpenAiModel, summarize_map_reduce};
use crate::web::{self, AppState};
use std::sync::Arc;
use tracing::info;

/// Executes the CLI command.
///
/// # Returns
///
/// Result with output string on success. `serve` returns an empty string
/// once the server has shut down.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the command fails.
pub async fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = cli.config()?;

    match cli.command_or_default() {
        Commands::Serve => cmd_serve(&config).await,
        Commands::Extract { url } => cmd_extract(&config, url.trim(), format).await,
        Commands::Summarize { url, level } => {
            cmd_summarize(&config, url.trim(), SummaryLevel::parse(&level), format).await
        }
    }
}

async fn cmd_serve(config: &AppConfig) -> Result<String> {
    let extractor: Arc<dyn TextExtractor> = Arc::new(HttpExtractor::new(&config.extractor)?);
    let model: Arc<dyn LanguageModel> = Arc::new(OpenAiModel::new(&config.openai)?);
    info!(
        model = model.name(),
        version = env!("CARGO_PKG_VERSION"),
        "starting paper-digest"
    );

    let state = Arc::new(AppState::new(extractor, model, config.web.clone()));
    web::serve(&config.bind_addr(), state).await?;
    Ok(String::new())
}

async fn cmd_extract(config: &AppConfig, url: &str, format: OutputFormat) -> Result<String> {
    require_http_url(url)?;
    let extractor = HttpExtractor::new(&config.extractor)?;
    let text = extractor.extract(url).await?;
    Ok(format_extract(url, &text, format))
}

async fn cmd_summarize(
    config: &AppConfig,
    url: &str,
    level: SummaryLevel,
    format: OutputFormat,
) -> Result<String> {
    require_http_url(url)?;
    // Build the model first so a missing key fails before the download
    let model: Arc<dyn LanguageModel> = Arc::new(OpenAiModel::new(&config.openai)?);
    let extractor = HttpExtractor::new(&config.extractor)?;

    let text = extractor.extract(url).await?;
    if !config.web.accepts_text(&text) {
        return Err(RequestError::NotEnoughText.into());
    }

    let summary = summarize_map_reduce(&model, &config.web.summary, &text, level).await?;
    Ok(format_summary(url, level, &summary, format))
}

fn require_http_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(RequestError::InvalidUrl.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LlmError};
    use clap::Parser;

    #[test]
    fn test_require_http_url() {
        assert!(require_http_url("https://arxiv.org/abs/1").is_ok());
        assert!(matches!(
            require_http_url("file:///etc/passwd"),
            Err(Error::Request(RequestError::InvalidUrl))
        ));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_http_url() {
        let cli = Cli::try_parse_from(["paper-digest", "extract", "notaurl"]).unwrap();
        let err = execute(&cli).await.unwrap_err();
        assert!(matches!(err, Error::Request(RequestError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_summarize_without_key_fails_before_fetching() {
        let cli = Cli::try_parse_from([
            "paper-digest",
            "summarize",
            "http://127.0.0.1:9/paper.pdf",
            "--openai-api-key",
            "",
        ])
        .unwrap();
        let err = execute(&cli).await.unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_invalid_config_is_reported() {
        let cli = Cli::try_parse_from(["paper-digest", "extract", "https://a", "--map-concurrency", "0"])
            .unwrap();
        let err = execute(&cli).await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
