//! Chunking for paper-digest.
//!
//! Documents longer than a single model call are split before the map step
//! of summarization. [`SemanticChunker`] cuts at paragraph, line, sentence,
//! or word boundaries, in that order of preference.

pub mod config;
pub mod semantic;

pub use config::ChunkConfig;
pub use semantic::SemanticChunker;

/// Default chunk size in bytes (~3k tokens at 4 chars/token).
pub const DEFAULT_CHUNK_SIZE: usize = 12_000;

/// Default overlap size in bytes (for context continuity).
pub const DEFAULT_OVERLAP: usize = 200;

/// Default cap on chunks summarized per document.
pub const DEFAULT_MAX_CHUNKS: usize = 40;

/// Maximum allowed chunk size (250k bytes, ~62k tokens).
pub const MAX_CHUNK_SIZE: usize = 250_000;
