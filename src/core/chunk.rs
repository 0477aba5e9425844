//! Chunk representation.
//!
//! A chunk is a slice of a document's text handed to one map call. It keeps
//! its position so map results can be put back in document order.

use std::ops::Range;

/// A contiguous slice of document text.
///
/// # Examples
///
/// ```
/// use paper_digest::core::Chunk;
///
/// let chunk = Chunk::new("Hello, world!".to_string(), 0..13, 0);
/// assert_eq!(chunk.size(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk content.
    pub content: String,

    /// Byte range in the original text.
    pub byte_range: Range<usize>,

    /// Sequential index within the document (0-based).
    pub index: usize,
}

impl Chunk {
    /// Creates a new chunk.
    #[must_use]
    pub const fn new(content: String, byte_range: Range<usize>, index: usize) -> Self {
        Self {
            content,
            byte_range,
            index,
        }
    }

    /// Creates the chunk covering `range` of `text`.
    #[must_use]
    pub fn slice(text: &str, range: Range<usize>, index: usize) -> Self {
        Self::new(text[range.clone()].to_string(), range, index)
    }

    /// Returns the size of the chunk in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Returns the start byte offset in the original text.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.byte_range.start
    }

    /// Returns the end byte offset in the original text.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.byte_range.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_new() {
        let chunk = Chunk::new("content".to_string(), 0..7, 3);
        assert_eq!(chunk.index, 3);
        assert_eq!(chunk.start(), 0);
        assert_eq!(chunk.end(), 7);
        assert_eq!(chunk.size(), 7);
    }

    #[test]
    fn test_chunk_slice() {
        let chunk = Chunk::slice("ab世界cd", 2..8, 1);
        assert_eq!(chunk.content, "世界");
        assert_eq!(chunk.byte_range, 2..8);
        assert_eq!(chunk.index, 1);
    }
}
