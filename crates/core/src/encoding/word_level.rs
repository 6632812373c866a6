//! Word-level BPE encoding and decoding.
//!
//! Every word is wrapped in start/end markers and merged independently, and
//! words are joined with a separator token. Symbols the vocabulary does not
//! know are dropped without error, both when encoding and when decoding.

use crate::core::vocab::{
    is_no_leading_space, END_OF_WORD, END_OF_WORD_ID, START_OF_WORD, START_OF_WORD_ID,
    WORD_SEPARATOR_ID,
};
use crate::core::{MergeRules, Vocabulary};
use std::sync::Arc;

/// How learned merges are applied to a word at encoding time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Merge any adjacent pair that is a learned rule, scanning left to right
    /// and repeating passes until nothing changes. Rank is not consulted.
    #[default]
    Unordered,
    /// Always apply the lowest-ranked eligible rule first, as in standard BPE.
    Ranked,
}

/// A symbol of a word being encoded. `None` is a character the vocabulary
/// does not contain; it never merges and is dropped from the output.
type Symbol = Option<u32>;

/// Word-level BPE encoder.
///
/// Holds shared, read-only handles to the trained vocabulary and merge rules,
/// so one encoder can serve any number of threads.
#[derive(Debug, Clone)]
pub struct WordLevelEncoder {
    /// Vocabulary for token lookups
    vocab: Arc<Vocabulary>,
    /// Learned merge rules
    merges: Arc<MergeRules>,
    /// Merge application policy
    policy: MergePolicy,
}

impl WordLevelEncoder {
    /// Create a new encoder sharing the given vocabulary and merges.
    pub fn with_arcs(vocab: Arc<Vocabulary>, merges: Arc<MergeRules>, policy: MergePolicy) -> Self {
        Self {
            vocab,
            merges,
            policy,
        }
    }

    /// The merge policy in use.
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Encode a sequence of pre-split words into token IDs.
    ///
    /// A separator is inserted between consecutive words, except before the
    /// first word and before punctuation that takes no leading space.
    pub fn encode_words<S: AsRef<str>>(&self, words: &[S]) -> Vec<u32> {
        let mut ids = Vec::new();

        for (i, word) in words.iter().enumerate() {
            let word = word.as_ref();
            if i > 0 && !is_no_leading_space(word) {
                ids.push(WORD_SEPARATOR_ID);
            }
            ids.extend(self.encode_word(word));
        }

        ids
    }

    /// Encode a single word, including its start and end markers.
    pub fn encode_word(&self, word: &str) -> Vec<u32> {
        let mut symbols = self.initial_symbols(word);

        match self.policy {
            MergePolicy::Unordered => self.merge_unordered(&mut symbols),
            MergePolicy::Ranked => self.merge_ranked(&mut symbols),
        }

        let before = symbols.len();
        let ids: Vec<u32> = symbols.into_iter().flatten().collect();
        if ids.len() < before {
            log::trace!(
                "dropped {} unknown symbol(s) while encoding {:?}",
                before - ids.len(),
                word
            );
        }
        ids
    }

    /// `[<] + characters + [>]`, with unknown characters kept as `None`.
    fn initial_symbols(&self, word: &str) -> Vec<Symbol> {
        let mut symbols = Vec::with_capacity(word.len() + 2);
        symbols.push(Some(START_OF_WORD_ID));

        let mut buf = [0u8; 4];
        for ch in word.chars() {
            symbols.push(self.vocab.get_id(ch.encode_utf8(&mut buf)));
        }

        symbols.push(Some(END_OF_WORD_ID));
        symbols
    }

    #[inline]
    fn merge_target(&self, left: Symbol, right: Symbol) -> Option<(u32, u32)> {
        match (left, right) {
            (Some(l), Some(r)) => self.merges.get((l, r)),
            _ => None,
        }
    }

    fn merge_unordered(&self, symbols: &mut Vec<Symbol>) {
        loop {
            let mut changed = false;
            let mut i = 0;

            while i + 1 < symbols.len() {
                match self.merge_target(symbols[i], symbols[i + 1]) {
                    Some((_, new_token_id)) => {
                        // Stay at i: the merged symbol may merge with its new neighbour.
                        symbols[i] = Some(new_token_id);
                        symbols.remove(i + 1);
                        changed = true;
                    }
                    None => i += 1,
                }
            }

            if !changed {
                break;
            }
        }
    }

    fn merge_ranked(&self, symbols: &mut Vec<Symbol>) {
        loop {
            let best = symbols
                .windows(2)
                .filter_map(|w| {
                    self.merge_target(w[0], w[1])
                        .map(|(rank, new_token_id)| (rank, (w[0], w[1]), new_token_id))
                })
                .min_by_key(|&(rank, _, _)| rank);

            let Some((_, (left, right), new_token_id)) = best else {
                break;
            };

            let mut i = 0;
            while i + 1 < symbols.len() {
                if symbols[i] == left && symbols[i + 1] == right {
                    symbols[i] = Some(new_token_id);
                    symbols.remove(i + 1);
                }
                i += 1;
            }
        }
    }

    /// Decode token IDs back to text.
    ///
    /// Separator tokens delimit words. Each word has its markers stripped and
    /// whitespace normalized, and words are joined with single spaces except
    /// before no-leading-space punctuation. Unknown IDs are skipped.
    pub fn decode(&self, ids: &[u32]) -> String {
        let mut words: Vec<String> = Vec::new();
        let mut raw = String::new();

        for &id in ids {
            if id == WORD_SEPARATOR_ID {
                push_recovered(&mut words, &raw);
                raw.clear();
                continue;
            }
            match self.vocab.get_token(id) {
                Some(token) => raw.push_str(token),
                None => log::trace!("dropped unknown token ID {} while decoding", id),
            }
        }
        push_recovered(&mut words, &raw);

        join_words(&words)
    }
}

/// Strip word markers from a raw decoded word and collapse its whitespace.
pub fn clean_word(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !START_OF_WORD.contains(*c) && !END_OF_WORD.contains(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_recovered(words: &mut Vec<String>, raw: &str) {
    let word = clean_word(raw);
    if !word.is_empty() {
        words.push(word);
    }
}

/// Join recovered words, omitting the space before the first word and before
/// no-leading-space punctuation.
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    let mut text = String::new();
    for (i, word) in words.iter().enumerate() {
        let word = word.as_ref();
        if i > 0 && !is_no_leading_space(word) {
            text.push(' ');
        }
        text.push_str(word);
    }
    text
}
