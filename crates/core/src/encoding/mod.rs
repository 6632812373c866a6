//! Encoding modes.
//!
//! Only word-level encoding is provided: each word is wrapped in markers and
//! merged on its own.

pub mod word_level;

pub use word_level::{clean_word, join_words, MergePolicy, WordLevelEncoder};
