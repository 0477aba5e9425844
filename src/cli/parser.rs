//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros. Every setting can
//! also come from the environment (a `.env` file is loaded first).

use crate::chunking::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CHUNKS, DEFAULT_OVERLAP};
use crate::config::AppConfig;
use crate::error::Result;
use crate::extract::ExtractorConfig;
use crate::llm::summarize::{DEFAULT_MAP_CONCURRENCY, DEFAULT_REDUCE_MAX_CHARS};
use crate::llm::{DEFAULT_BASE_URL, DEFAULT_CHAT_CONTEXT_CHARS, DEFAULT_MODEL, OpenAiConfig, SummaryConfig};
use crate::web::{DEFAULT_MIN_TEXT_CHARS, WebSettings};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// paper-digest: summarize papers from a URL and chat about them.
///
/// Runs a small web app by default. The `extract` and `summarize`
/// subcommands run the same pipeline once from the terminal.
#[derive(Parser, Debug)]
#[command(name = "paper-digest")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Runtime settings.
    #[command(flatten)]
    pub settings: Settings,

    /// The subcommand to execute (defaults to `serve`).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Settings shared by all commands.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000, global = true)]
    pub port: u16,

    /// API key for the language model.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub openai_base_url: String,

    /// Model name.
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub openai_model: String,

    /// Chunk size in bytes for the map step.
    #[arg(long, env = "PAPER_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE, global = true)]
    pub chunk_size: usize,

    /// Overlap between chunks in bytes.
    #[arg(long, env = "PAPER_CHUNK_OVERLAP", default_value_t = DEFAULT_OVERLAP, global = true)]
    pub chunk_overlap: usize,

    /// Chunks beyond this many are not summarized.
    #[arg(long, env = "PAPER_MAX_CHUNKS", default_value_t = DEFAULT_MAX_CHUNKS, global = true)]
    pub max_chunks: usize,

    /// Concurrent map calls.
    #[arg(long, env = "PAPER_MAP_CONCURRENCY", default_value_t = DEFAULT_MAP_CONCURRENCY, global = true)]
    pub map_concurrency: usize,

    /// Character budget for notes sent to the reduce call.
    #[arg(long, env = "PAPER_REDUCE_MAX_CHARS", default_value_t = DEFAULT_REDUCE_MAX_CHARS, global = true)]
    pub reduce_max_chars: usize,

    /// Document characters embedded in chat prompts.
    #[arg(long, env = "PAPER_CHAT_CONTEXT_CHARS", default_value_t = DEFAULT_CHAT_CONTEXT_CHARS, global = true)]
    pub chat_context_chars: usize,

    /// Minimum characters an extracted document must have.
    #[arg(long, env = "PAPER_MIN_TEXT_CHARS", default_value_t = DEFAULT_MIN_TEXT_CHARS, global = true)]
    pub min_text_chars: usize,

    /// Download timeout in seconds.
    #[arg(long, env = "PAPER_FETCH_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub fetch_timeout_secs: u64,

    /// Largest accepted download in bytes.
    #[arg(long, env = "PAPER_MAX_DOWNLOAD_BYTES", default_value_t = 25 * 1024 * 1024, global = true)]
    pub max_download_bytes: usize,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the web app.
    Serve,

    /// Print the text extracted from a URL.
    Extract {
        /// Document URL.
        url: String,
    },

    /// Print a summary of the document at a URL.
    Summarize {
        /// Document URL.
        url: String,

        /// Summary level (LOW, MEDIUM, HIGH).
        #[arg(short, long, default_value = "LOW")]
        level: String,
    },
}

impl Cli {
    /// Returns the subcommand, defaulting to `serve`.
    #[must_use]
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }

    /// Builds and validates the runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for invalid values.
    pub fn config(&self) -> Result<AppConfig> {
        let s = &self.settings;
        let config = AppConfig {
            host: s.host.clone(),
            port: s.port,
            openai: OpenAiConfig {
                api_key: s.openai_api_key.clone(),
                base_url: s.openai_base_url.clone(),
                model: s.openai_model.clone(),
            },
            extractor: ExtractorConfig {
                timeout: Duration::from_secs(s.fetch_timeout_secs),
                max_bytes: s.max_download_bytes,
                ..ExtractorConfig::default()
            },
            web: WebSettings {
                min_text_chars: s.min_text_chars,
                chat_context_chars: s.chat_context_chars,
                summary: SummaryConfig {
                    chunk_size: s.chunk_size,
                    overlap: s.chunk_overlap,
                    max_chunks: s.max_chunks,
                    map_concurrency: s.map_concurrency,
                    reduce_max_chars: s.reduce_max_chars,
                    ..SummaryConfig::default()
                },
            },
        };
        config.validate()?;
        Ok(config)
    }
}
