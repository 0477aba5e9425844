//! Text utilities for paper-digest.
//!
//! Character-boundary helpers used by the chunkers and prompt builders, and
//! whitespace normalization applied to extracted documents.

pub mod normalize;
pub mod unicode;

pub use normalize::{collapse_inline_whitespace, squeeze_lines, tidy_text};
pub use unicode::{find_char_boundary, truncate_chars};
