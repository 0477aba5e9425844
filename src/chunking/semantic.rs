//! Semantic chunking strategy.
//!
//! Provides Unicode-aware chunking that respects paragraph, line, sentence,
//! and word boundaries using the `unicode-segmentation` crate.

use super::ChunkConfig;
use crate::core::Chunk;
use crate::error::Result;
use crate::text::find_char_boundary;
use unicode_segmentation::UnicodeSegmentation;

/// Bytes of text before the search window fed to sentence segmentation.
const SENTENCE_LEAD_IN: usize = 256;

/// Splits text where a human would pause reading, so each map call sees
/// whole paragraphs or sentences.
///
/// # Examples
///
/// ```
/// use paper_digest::chunking::{ChunkConfig, SemanticChunker};
///
/// let chunker = SemanticChunker::new(ChunkConfig::new(40, 0)).min_chunk_size(0);
/// let text = "Hello, world! This is a test. Another sentence here.";
/// let chunks = chunker.chunk(text).unwrap();
/// assert!(chunks.len() > 1);
/// ```
#[derive(Debug, Clone)]
pub struct SemanticChunker {
    config: ChunkConfig,
    /// A trailing chunk smaller than this is folded into its predecessor.
    min_chunk_size: usize,
}

impl Default for SemanticChunker {
    fn default() -> Self {
        Self::new(ChunkConfig::default())
    }
}

impl SemanticChunker {
    /// Creates a chunker for `config`.
    #[must_use]
    pub const fn new(config: ChunkConfig) -> Self {
        Self {
            config,
            min_chunk_size: 100,
        }
    }

    /// Sets the minimum chunk size.
    #[must_use]
    pub const fn min_chunk_size(mut self, size: usize) -> Self {
        self.min_chunk_size = size;
        self
    }

    /// Chunks `text`, stopping early once `max_chunks` is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        let ChunkConfig {
            chunk_size,
            overlap,
            ..
        } = self.config;
        self.config.validate()?;

        if text.is_empty() {
            return Ok(vec![]);
        }
        if text.len() <= chunk_size {
            return Ok(vec![Chunk::slice(text, 0..text.len(), 0)]);
        }

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut start = 0;
        let mut truncated = false;

        while start < text.len() {
            let end = find_best_boundary(text, start + chunk_size, chunk_size / 5);
            let end = if end <= start {
                text[start..]
                    .chars()
                    .next()
                    .map_or(text.len(), |c| start + c.len_utf8())
            } else {
                end
            };

            chunks.push(Chunk::slice(text, start..end, chunks.len()));

            if end >= text.len() {
                break;
            }
            if self.config.limit_reached(chunks.len()) {
                truncated = true;
                break;
            }

            let next_start = if overlap > 0 {
                overlap_start(text, end, overlap)
            } else {
                end
            };
            start = if next_start <= start { end } else { next_start };
        }

        // Fold a tiny trailing chunk into its predecessor
        if !truncated
            && chunks.len() > 1
            && chunks.last().is_some_and(|last| last.size() < self.min_chunk_size)
            && let Some(last) = chunks.pop()
            && let Some(previous) = chunks.pop()
        {
            chunks.push(Chunk::slice(text, previous.start()..last.end(), chunks.len()));
        }

        Ok(chunks)
    }
}

/// Finds the best boundary at or before `target_pos`, looking back at most
/// `look_back` bytes.
///
/// Prefers paragraph breaks > line breaks > sentence breaks > word breaks > character breaks.
fn find_best_boundary(text: &str, target_pos: usize, look_back: usize) -> usize {
    if target_pos >= text.len() {
        return text.len();
    }

    let search_start = find_char_boundary(text, target_pos.saturating_sub(look_back));
    let search_end = find_char_boundary(text, target_pos);

    if search_start >= search_end {
        return search_end;
    }

    let region = &text[search_start..search_end];

    if let Some(pos) = region.rfind("\n\n") {
        return search_start + pos + 2;
    }

    if let Some(pos) = region.rfind('\n') {
        return search_start + pos + 1;
    }

    // Segment with some lead-in so a sentence ending right at the region
    // start is still recognised
    let context_start = find_char_boundary(text, search_start.saturating_sub(SENTENCE_LEAD_IN));
    if let Some(pos) = text[context_start..search_end]
        .split_sentence_bound_indices()
        .map(|(pos, _)| context_start + pos)
        .filter(|pos| *pos > search_start)
        .last()
    {
        return pos;
    }

    if let Some(pos) = region.rfind(' ') {
        return search_start + pos + 1;
    }

    search_end
}

/// Returns where the chunk following one that ends at `end` begins.
///
/// The start is the earliest good boundary within the last `overlap` bytes,
/// so the repeated text never exceeds `overlap`. Without a boundary the
/// window is repeated as is.
fn overlap_start(text: &str, end: usize, overlap: usize) -> usize {
    let mut start = end.saturating_sub(overlap);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    if start >= end {
        return end;
    }

    let window = &text[start..end];
    let inside = |pos: &usize| *pos < end;

    if let Some(pos) = window
        .match_indices("\n\n")
        .map(|(i, _)| start + i + 2)
        .find(inside)
    {
        return pos;
    }

    if let Some(pos) = window.match_indices('\n').map(|(i, _)| start + i + 1).find(inside) {
        return pos;
    }

    let context_start = find_char_boundary(text, start.saturating_sub(SENTENCE_LEAD_IN));
    if let Some(pos) = text[context_start..end]
        .split_sentence_bound_indices()
        .map(|(pos, _)| context_start + pos)
        .find(|pos| *pos > start && *pos < end)
    {
        return pos;
    }

    if let Some(pos) = window.match_indices(' ').map(|(i, _)| start + i + 1).find(inside) {
        return pos;
    }

    start
}
