//! Pair counting for BPE training.
//!
//! Words are stored once per distinct spelling together with their number of
//! occurrences. Pair statistics are always recomputed from the current state
//! of every word instead of being updated incrementally.

use ahash::AHashMap;
use wordbpe_core::{Pair, Vocabulary, END_OF_WORD_ID, START_OF_WORD_ID};

/// Counter for BPE pair frequencies.
#[derive(Debug, Default)]
pub struct PairCounter {
    /// Word -> tokenized representation (as token IDs)
    words: Vec<Vec<u32>>,
    /// Word -> frequency count
    word_counts: Vec<u64>,
    /// Word spelling -> position in `words`
    index: AHashMap<String, usize>,
}

impl PairCounter {
    /// Create a new pair counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single word to the counter.
    ///
    /// The word is tokenized into `[<] + characters + [>]`. Characters missing
    /// from `vocab` are skipped. A word already present only has its count
    /// bumped, so its tokens keep any merges applied so far.
    pub fn add_word(&mut self, word: &str, vocab: &Vocabulary) {
        if let Some(&pos) = self.index.get(word) {
            self.word_counts[pos] += 1;
            return;
        }

        let mut buf = [0u8; 4];
        let mut word_tokens = Vec::with_capacity(word.len() + 2);
        word_tokens.push(START_OF_WORD_ID);
        word_tokens.extend(word.chars().filter_map(|c| vocab.get_id(c.encode_utf8(&mut buf))));
        word_tokens.push(END_OF_WORD_ID);

        self.index.insert(word.to_string(), self.words.len());
        self.words.push(word_tokens);
        self.word_counts.push(1);
    }

    /// Count all adjacent pairs over every word occurrence.
    ///
    /// Words shorter than two tokens contribute nothing.
    pub fn count_pairs(&self) -> AHashMap<Pair, u64> {
        let mut pair_counts: AHashMap<Pair, u64> = AHashMap::new();

        for (word, &count) in self.words.iter().zip(self.word_counts.iter()) {
            for window in word.windows(2) {
                let pair = (window[0], window[1]);
                *pair_counts.entry(pair).or_insert(0) += count;
            }
        }

        pair_counts
    }

    /// Total number of adjacent-pair positions, i.e. the sum over all word
    /// occurrences of `max(0, len - 1)`.
    pub fn pair_slots(&self) -> u64 {
        self.words
            .iter()
            .zip(self.word_counts.iter())
            .map(|(word, &count)| word.len().saturating_sub(1) as u64 * count)
            .sum()
    }

    /// Get the number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total count of all word occurrences.
    pub fn total_word_occurrences(&self) -> u64 {
        self.word_counts.iter().sum()
    }

    /// Get a reference to the words.
    pub fn words(&self) -> &[Vec<u32>] {
        &self.words
    }

    /// Get a reference to the word counts.
    pub fn word_counts(&self) -> &[u64] {
        &self.word_counts
    }

    /// Merge a pair in all words (mutates words in place).
    ///
    /// Occurrences are replaced greedily left to right without overlap.
    /// Returns the number of replacements, weighted by word frequency.
    pub fn merge_pair_in_words(&mut self, pair: Pair, new_token_id: u32) -> u64 {
        let mut replaced = 0;

        for (word, &count) in self.words.iter_mut().zip(self.word_counts.iter()) {
            let mut i = 0;

            while i + 1 < word.len() {
                if word[i] == pair.0 && word[i + 1] == pair.1 {
                    word[i] = new_token_id;
                    word.remove(i + 1);
                    replaced += count;
                }
                i += 1;
            }
        }

        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::initialize(&["abcde"])
    }

    #[test]
    fn test_add_word() {
        let vocab = vocab();
        let mut counter = PairCounter::new();
        counter.add_word("abc", &vocab);

        assert_eq!(counter.word_count(), 1);
        assert_eq!(counter.words()[0].as_slice(), &[0, 3, 4, 5, 1]);
    }

    #[test]
    fn test_duplicate_words_share_an_entry() {
        let vocab = vocab();
        let mut counter = PairCounter::new();
        counter.add_word("ab", &vocab);
        counter.add_word("ab", &vocab);
        counter.add_word("ab", &vocab);

        assert_eq!(counter.word_count(), 1);
        assert_eq!(counter.total_word_occurrences(), 3);
        assert_eq!(counter.count_pairs().get(&(3, 4)), Some(&3));
    }

    #[test]
    fn test_count_pairs_includes_markers() {
        let vocab = vocab();
        let mut counter = PairCounter::new();
        counter.add_word("ab", &vocab);

        let pairs = counter.count_pairs();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.get(&(0, 3)), Some(&1)); // (<, a)
        assert_eq!(pairs.get(&(3, 4)), Some(&1)); // (a, b)
        assert_eq!(pairs.get(&(4, 1)), Some(&1)); // (b, >)
    }

    #[test]
    fn test_count_pairs_across_words() {
        let vocab = vocab();
        let mut counter = PairCounter::new();
        counter.add_word("abc", &vocab);
        counter.add_word("bcd", &vocab);
        counter.add_word("cde", &vocab);

        let pairs = counter.count_pairs();
        assert_eq!(pairs.get(&(3, 4)), Some(&1)); // (a,b)
        assert_eq!(pairs.get(&(4, 5)), Some(&2)); // (b,c)
        assert_eq!(pairs.get(&(5, 6)), Some(&2)); // (c,d)
        assert_eq!(pairs.get(&(6, 7)), Some(&1)); // (d,e)
    }

    #[test]
    fn test_pair_slots() {
        let vocab = vocab();
        let mut counter = PairCounter::new();
        counter.add_word("ab", &vocab);
        counter.add_word("ab", &vocab);
        counter.add_word("cde", &vocab);

        // <ab> has 3 slots (twice), <cde> has 4
        assert_eq!(counter.pair_slots(), 10);
    }

    #[test]
    fn test_merge_is_non_overlapping() {
        let vocab = Vocabulary::initialize(&["a"]);
        let mut counter = PairCounter::new();
        counter.add_word("aaa", &vocab);

        // < a a a >  ->  < aa a >
        let replaced = counter.merge_pair_in_words((3, 3), 4);
        assert_eq!(replaced, 1);
        assert_eq!(counter.words()[0].as_slice(), &[0, 4, 3, 1]);
    }

    #[test]
    fn test_merge_weighted_by_frequency() {
        let vocab = vocab();
        let mut counter = PairCounter::new();
        counter.add_word("abab", &vocab);
        counter.add_word("abab", &vocab);

        let replaced = counter.merge_pair_in_words((3, 4), 8);
        assert_eq!(replaced, 4);
        assert_eq!(counter.words()[0].as_slice(), &[0, 8, 8, 1]);
        assert_eq!(counter.pair_slots(), 6);
    }

    #[test]
    fn test_add_word_after_merge_reuses_entry() {
        let vocab = vocab();
        let mut counter = PairCounter::new();
        counter.add_word("ab", &vocab);
        counter.merge_pair_in_words((3, 4), 8);

        counter.add_word("ab", &vocab);
        assert_eq!(counter.word_count(), 1);
        assert_eq!(counter.total_word_occurrences(), 2);
        assert_eq!(counter.words()[0].as_slice(), &[0, 8, 1]);
        assert_eq!(counter.count_pairs().get(&(0, 8)), Some(&2));
    }
}
