//! wordbpe-core - Core BPE data structures
//!
//! This crate provides the vocabulary, merge rule table and word-level
//! encoder/decoder used by the wordbpe tokenizer.
//!
//! # Features
//!
//! - Bidirectional vocabulary with reserved word markers at fixed ids
//! - Merge rules with rank order and `AHashMap` lookups
//! - Word-level encoding with a selectable merge policy
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use wordbpe_core::Vocabulary;
//!
//! let vocab = Vocabulary::initialize(&["hello", "world"]);
//! assert_eq!(vocab.get_id("<"), Some(0));
//! assert_eq!(vocab.get_id(">"), Some(1));
//! assert_eq!(vocab.get_id(" "), Some(2));
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data structures
pub mod core;
pub use crate::core::vocab::{
    is_no_leading_space, END_OF_WORD, END_OF_WORD_ID, NO_LEADING_SPACE, RESERVED_COUNT,
    START_OF_WORD, START_OF_WORD_ID, WORD_SEPARATOR, WORD_SEPARATOR_ID,
};
pub use crate::core::{MergeMap, MergeRule, MergeRules, Pair, Vocab, VocabR, Vocabulary};

// Encoding
pub mod encoding;
pub use encoding::{MergePolicy, WordLevelEncoder};
