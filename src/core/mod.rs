//! Core domain models for paper-digest.
//!
//! This module contains the fundamental data structures used throughout the
//! crate: summary levels, documents, chunks, and chat turns. These are pure
//! domain models with no I/O dependencies.

pub mod chat;
pub mod chunk;
pub mod document;
pub mod level;

pub use chat::{ChatKey, ChatRole, ChatTurn};
pub use chunk::Chunk;
pub use document::{Document, has_enough_text};
pub use level::SummaryLevel;
