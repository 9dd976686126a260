//! Core types for find/replace: character ranges and word classification.

/// Character-indexed text ranges.
pub mod range;
/// Word classification and offset conversion.
pub mod text;

pub use range::{CharIdx, CharLen, TextRange};
pub use text::{CharOffsets, is_word, is_word_char};
