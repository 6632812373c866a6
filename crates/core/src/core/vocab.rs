//! Vocabulary storage and lookup.
//!
//! The vocabulary is a bijection between token strings and dense ids. Ids are
//! handed out in creation order and never reassigned. The three reserved
//! markers always occupy ids 0, 1 and 2.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use std::collections::BTreeSet;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = AHashMap<u32, CompactString>;

/// Start-of-word marker.
pub const START_OF_WORD: &str = "<";
/// End-of-word marker.
pub const END_OF_WORD: &str = ">";
/// Token emitted between two words.
pub const WORD_SEPARATOR: &str = " ";

pub const START_OF_WORD_ID: u32 = 0;
pub const END_OF_WORD_ID: u32 = 1;
pub const WORD_SEPARATOR_ID: u32 = 2;

/// Number of reserved entries at the front of every vocabulary.
pub const RESERVED_COUNT: usize = 3;

/// Punctuation that attaches to the preceding word without a separator.
pub const NO_LEADING_SPACE: [&str; 11] = [".", ",", "!", "?", ":", ";", ")", "]", "}", "'", "\""];

/// Whether `word` is one of the punctuation marks written without a leading space.
#[inline]
pub fn is_no_leading_space(word: &str) -> bool {
    NO_LEADING_SPACE.contains(&word)
}

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    pub vocab: Vocab,
    /// Reverse mapping: ID -> token string
    pub vocab_r: VocabR,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self {
            vocab: Vocab::new(),
            vocab_r: VocabR::new(),
        }
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
        }
    }

    /// Create a vocabulary holding only the reserved markers.
    pub fn with_reserved() -> Self {
        let mut vocab = Self::with_capacity(RESERVED_COUNT);
        for token in [START_OF_WORD, END_OF_WORD, WORD_SEPARATOR] {
            vocab.add_token(token);
        }
        vocab
    }

    /// Build the base vocabulary for a list of words.
    ///
    /// The reserved markers get ids 0..=2, then every distinct character of
    /// `words` gets one id in code point order.
    pub fn initialize<S: AsRef<str>>(words: &[S]) -> Self {
        let chars: BTreeSet<char> = words.iter().flat_map(|w| w.as_ref().chars()).collect();

        let mut vocab = Self::with_reserved();
        let mut buf = [0u8; 4];
        for ch in chars {
            vocab.add_token(ch.encode_utf8(&mut buf));
        }

        vocab
    }

    /// Add a token to the vocabulary.
    ///
    /// Returns the ID assigned to the token, or the existing ID if the token
    /// is already known.
    pub fn add_token(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.vocab.get(token) {
            return id;
        }

        let token = CompactString::new(token);
        let id = self.vocab.len() as u32;
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);

        id
    }

    /// Add a token with a specific ID.
    ///
    /// Returns an error if either the ID or the token is already taken.
    pub fn add_token_with_id(&mut self, token: &str, id: u32) -> Result<()> {
        if let Some(existing) = self.vocab_r.get(&id) {
            return Err(TokenizerError::Load(format!(
                "Token ID {} assigned to both {:?} and {:?}",
                id, existing, token
            )));
        }
        if let Some(&existing) = self.vocab.get(token) {
            return Err(TokenizerError::Load(format!(
                "Token {:?} assigned to both ID {} and ID {}",
                token, existing, id
            )));
        }

        let token = CompactString::new(token);
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);

        Ok(())
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Entries sorted by id.
    pub fn entries_by_id(&self) -> Vec<(u32, &str)> {
        let mut entries: Vec<(u32, &str)> = self
            .vocab_r
            .iter()
            .map(|(&id, token)| (id, token.as_str()))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries
    }

    /// Check that ids form the dense range `0..len` and the reserved markers
    /// sit at their fixed ids.
    pub fn validate(&self) -> Result<()> {
        if self.vocab.len() != self.vocab_r.len() {
            return Err(TokenizerError::Load(
                "Forward and reverse vocabulary differ in size".to_string(),
            ));
        }
        for id in 0..self.len() as u32 {
            if !self.vocab_r.contains_key(&id) {
                return Err(TokenizerError::Load(format!(
                    "Vocabulary ids are not contiguous: missing ID {}",
                    id
                )));
            }
        }
        for (token, id) in [
            (START_OF_WORD, START_OF_WORD_ID),
            (END_OF_WORD, END_OF_WORD_ID),
            (WORD_SEPARATOR, WORD_SEPARATOR_ID),
        ] {
            if self.get_id(token) != Some(id) {
                return Err(TokenizerError::Load(format!(
                    "Reserved token {:?} must have ID {}",
                    token, id
                )));
            }
        }
        Ok(())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
