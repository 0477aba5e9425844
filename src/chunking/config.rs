//! Chunk sizing settings.

use super::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, MAX_CHUNK_SIZE};
use crate::error::{ChunkingError, Result};

/// How a document is cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Target chunk size in bytes.
    pub chunk_size: usize,

    /// Bytes of the previous chunk repeated at the start of the next one.
    /// This is an upper bound; the overlap starts at a boundary inside it.
    pub overlap: usize,

    /// Maximum chunks to produce (0 = unlimited).
    pub max_chunks: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP)
    }
}

impl ChunkConfig {
    /// Creates settings with no chunk cap.
    #[must_use]
    pub const fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            max_chunks: 0,
        }
    }

    /// Sets maximum chunks.
    #[must_use]
    pub const fn max_chunks(mut self, max: usize) -> Self {
        self.max_chunks = max;
        self
    }

    /// Returns true once `produced` chunks reach the configured cap.
    #[must_use]
    pub const fn limit_reached(&self, produced: usize) -> bool {
        self.max_chunks > 0 && produced >= self.max_chunks
    }

    /// Checks the size and overlap against the crate limits.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError`] when the size is zero, above
    /// [`MAX_CHUNK_SIZE`], or not larger than the overlap.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChunkingError::InvalidConfig {
                reason: "chunk_size must be > 0".to_string(),
            }
            .into());
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ChunkingError::ChunkTooLarge {
                size: self.chunk_size,
                max: MAX_CHUNK_SIZE,
            }
            .into());
        }
        if self.overlap >= self.chunk_size {
            return Err(ChunkingError::OverlapTooLarge {
                overlap: self.overlap,
                size: self.chunk_size,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_defaults() {
        let config = ChunkConfig::default();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.overlap, DEFAULT_OVERLAP);
        assert_eq!(config.max_chunks, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_limit_reached() {
        assert!(!ChunkConfig::new(10, 0).limit_reached(1_000));
        let config = ChunkConfig::new(10, 0).max_chunks(2);
        assert!(!config.limit_reached(1));
        assert!(config.limit_reached(2));
    }

    #[test_case(0, 0 ; "zero size")]
    #[test_case(50, 50 ; "overlap equal to size")]
    #[test_case(MAX_CHUNK_SIZE + 1, 0 ; "above maximum")]
    fn test_validate_rejects(chunk_size: usize, overlap: usize) {
        assert!(ChunkConfig::new(chunk_size, overlap).validate().is_err());
    }
}
