//! # paper-digest
//!
//! Summarize a paper from its URL and chat about it.
//!
//! A small web front-end over a text extraction and language model pipeline:
//!
//! 1. A URL is fetched and turned into plain text ([`extract`]). PDFs, HTML
//!    pages, and plain text are supported; arXiv abstract links are resolved
//!    to the PDF.
//! 2. The text is split with a semantic chunker ([`chunking`]), each chunk is
//!    condensed in parallel, and the notes are summarized at the requested
//!    [`SummaryLevel`] ([`llm`]).
//! 3. Follow-up questions are answered from the document text, with a
//!    per-session history ([`cache`]).
//!
//! The [`web`] module serves the page and JSON chat API; [`cli`] runs the
//! server or a single extraction/summary from the terminal.
//!
//! ## Features
//!
//! - **Pluggable collaborators**: [`TextExtractor`] and [`LanguageModel`] traits
//! - **Bounded map step**: at most N model calls in flight, notes kept in order
//! - **Unicode aware**: chunking and truncation never split a character
//! - **In-memory caches**: documents by URL, chats by session and URL

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cache;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod llm;
pub mod text;
pub mod web;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{ChatKey, ChatRole, ChatTurn, Chunk, Document, SummaryLevel};

// Re-export chunking types
pub use chunking::{ChunkConfig, SemanticChunker};

// Re-export collaborator traits and their defaults
pub use extract::{HttpExtractor, TextExtractor};
pub use llm::{CompletionRequest, LanguageModel, OpenAiModel, chat_answer, summarize_map_reduce};

// Re-export web and CLI entry points
pub use cache::{ChatStore, DocumentCache};
pub use cli::{Cli, Commands, OutputFormat};
pub use config::AppConfig;
pub use web::{AppState, WebSettings, build_app, serve};
