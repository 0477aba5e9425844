//! Map-reduce summarization.
//!
//! Long documents do not fit in one model call. The text is split with the
//! semantic chunker, each chunk is condensed to notes in parallel (map), and
//! the notes are summarized once more at the requested level (reduce).

use super::prompt::{
    MAP_SYSTEM_PROMPT, build_direct_prompt, build_map_prompt, build_reduce_prompt,
    level_system_prompt,
};
use super::{CompletionRequest, LanguageModel};
use crate::chunking::{
    ChunkConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CHUNKS, DEFAULT_OVERLAP, SemanticChunker,
};
use crate::core::{Chunk, SummaryLevel};
use crate::error::{Error, LlmError, RequestError, Result};
use crate::text::truncate_chars;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Default number of map calls in flight.
pub const DEFAULT_MAP_CONCURRENCY: usize = 4;

/// Default character budget for the notes sent to the reduce call.
pub const DEFAULT_REDUCE_MAX_CHARS: usize = 24_000;

/// Tuning for [`summarize_map_reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Target chunk size in bytes.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in bytes.
    pub overlap: usize,
    /// Chunks beyond this many are not summarized.
    pub max_chunks: usize,
    /// Concurrent map calls.
    pub map_concurrency: usize,
    /// Character budget for the joined notes.
    pub reduce_max_chars: usize,
    /// Output token limit of each map call.
    pub map_max_tokens: u32,
    /// Output token limit of the final summary.
    pub summary_max_tokens: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
            max_chunks: DEFAULT_MAX_CHUNKS,
            map_concurrency: DEFAULT_MAP_CONCURRENCY,
            reduce_max_chars: DEFAULT_REDUCE_MAX_CHARS,
            map_max_tokens: 700,
            summary_max_tokens: 1800,
        }
    }
}

impl SummaryConfig {
    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid chunk sizes or any zero limit.
    pub fn validate(&self) -> Result<()> {
        self.chunk_config().validate()?;
        let zero = [
            ("max_chunks", self.max_chunks == 0),
            ("map_concurrency", self.map_concurrency == 0),
            ("reduce_max_chars", self.reduce_max_chars == 0),
            ("map_max_tokens", self.map_max_tokens == 0),
            ("summary_max_tokens", self.summary_max_tokens == 0),
        ];
        if let Some((name, _)) = zero.iter().find(|(_, is_zero)| *is_zero) {
            return Err(Error::Config {
                message: format!("{name} must be > 0"),
            });
        }
        Ok(())
    }

    const fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig::new(self.chunk_size, self.overlap).max_chunks(self.max_chunks)
    }
}

/// Summarizes `text` at `level`.
///
/// A document that fits in a single chunk is summarized directly. Otherwise
/// each chunk is condensed to notes with at most
/// [`SummaryConfig::map_concurrency`] calls in flight, the notes are kept in
/// document order, and a final call writes the summary from them.
///
/// # Errors
///
/// Returns an error if the text is empty, chunking fails, or any model call
/// fails.
pub async fn summarize_map_reduce(
    model: &Arc<dyn LanguageModel>,
    config: &SummaryConfig,
    text: &str,
    level: SummaryLevel,
) -> Result<String> {
    let chunks = SemanticChunker::new(config.chunk_config()).chunk(text)?;
    if chunks.is_empty() {
        return Err(RequestError::NotEnoughText.into());
    }
    if let Some(last) = chunks.last()
        && last.end() < text.len()
    {
        warn!(
            chunks = chunks.len(),
            ignored_bytes = text.len() - last.end(),
            "document exceeds the chunk limit; the remainder is not summarized"
        );
    }

    let system = level_system_prompt(level);

    if let [only] = chunks.as_slice() {
        debug!(%level, model = model.name(), "summarizing single chunk");
        let request = CompletionRequest::new(system)
            .user(build_direct_prompt(&only.content))
            .max_tokens(config.summary_max_tokens);
        return model.complete(request).await;
    }

    info!(%level, chunks = chunks.len(), model = model.name(), "map step started");
    let notes = map_chunks(model, config, chunks).await?;
    if notes.is_empty() {
        return Err(LlmError::EmptyResponse.into());
    }

    let notes = fit_notes(notes, config.reduce_max_chars);
    info!(%level, notes = notes.len(), "reduce step started");
    let request = CompletionRequest::new(system)
        .user(build_reduce_prompt(&notes))
        .max_tokens(config.summary_max_tokens);
    model.complete(request).await
}

/// Runs the map step and returns the non-empty notes in chunk order.
async fn map_chunks(
    model: &Arc<dyn LanguageModel>,
    config: &SummaryConfig,
    chunks: Vec<Chunk>,
) -> Result<Vec<String>> {
    let total = chunks.len();
    let semaphore = Arc::new(Semaphore::new(config.map_concurrency.max(1)));
    let mut set = JoinSet::new();

    for chunk in chunks {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|e| LlmError::Task(e.to_string()))?;
        let model = Arc::clone(model);
        let max_tokens = config.map_max_tokens;
        set.spawn(async move {
            let _permit = permit;
            let request = CompletionRequest::new(MAP_SYSTEM_PROMPT)
                .user(build_map_prompt(&chunk.content, chunk.index + 1, total))
                .max_tokens(max_tokens);
            let note = model.complete(request).await?;
            Ok::<_, Error>((chunk.index, note))
        });
    }

    let mut notes = Vec::with_capacity(total);
    while let Some(joined) = set.join_next().await {
        let (index, note) = joined.map_err(LlmError::from)??;
        debug!(part = index + 1, total, chars = note.len(), "map note ready");
        notes.push((index, note));
    }
    notes.sort_by_key(|(index, _)| *index);

    Ok(notes
        .into_iter()
        .map(|(_, note)| note.trim().to_string())
        .filter(|note| !note.is_empty())
        .collect())
}

/// Keeps notes in order until `budget` characters are used, cutting the
/// last one that does not fit.
fn fit_notes(notes: Vec<String>, budget: usize) -> Vec<String> {
    let total_notes = notes.len();
    let mut remaining = budget;
    let mut kept = Vec::with_capacity(total_notes);

    for note in notes {
        if remaining == 0 {
            break;
        }
        let chars = note.chars().count();
        if chars <= remaining {
            remaining -= chars;
            kept.push(note);
        } else {
            kept.push(truncate_chars(&note, remaining).to_string());
            remaining = 0;
        }
    }

    if remaining == 0 {
        warn!(budget, notes = total_notes, kept = kept.len(), "notes truncated for reduce step");
    }
    kept
}
