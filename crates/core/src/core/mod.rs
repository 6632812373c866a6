//! Core BPE data structures.
//!
//! This module contains the vocabulary and merge rule tables shared by
//! training, encoding and persistence.

pub mod merges;
pub mod vocab;

pub use merges::{MergeMap, MergeRule, MergeRules, Pair};
pub use vocab::{Vocab, VocabR, Vocabulary};
