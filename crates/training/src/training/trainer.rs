//! BPE trainer implementation.
//!
//! The trainer learns merges by repeatedly counting adjacent pairs over the
//! whole corpus, merging the most frequent one and rewriting every word.
//! Counts are recomputed from scratch after each merge.

use super::counter::PairCounter;
use ahash::AHashMap;
use std::fmt;
use wordbpe_core::{MergeRules, Pair, Result, TokenizerError, Vocabulary};

/// Default minimum pair frequency; a pair seen once does not generalize.
pub const DEFAULT_MIN_FREQUENCY: u64 = 2;

/// Configuration for BPE training.
///
/// Exactly one of `vocab_size` and `num_merges` must be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Target vocabulary size
    pub vocab_size: Option<usize>,
    /// Target number of merges
    pub num_merges: Option<usize>,
    /// Minimum frequency for a pair to be merged
    pub min_frequency: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: None,
            num_merges: None,
            min_frequency: DEFAULT_MIN_FREQUENCY,
        }
    }
}

impl TrainingConfig {
    /// Train until the vocabulary reaches `vocab_size` tokens.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self {
            vocab_size: Some(vocab_size),
            ..Default::default()
        }
    }

    /// Train until `num_merges` merges have been learned.
    pub fn with_num_merges(num_merges: usize) -> Self {
        Self {
            num_merges: Some(num_merges),
            ..Default::default()
        }
    }

    /// Check that exactly one training target is set.
    pub fn validate(&self) -> Result<()> {
        match (self.vocab_size, self.num_merges) {
            (None, None) => Err(TokenizerError::InvalidConfig(
                "either a vocabulary size or a merge count is required".to_string(),
            )),
            (Some(_), Some(_)) => Err(TokenizerError::InvalidConfig(
                "vocabulary size and merge count are mutually exclusive".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Number of merges to attempt.
    ///
    /// A vocabulary target is turned into `vocab_size - base_vocab_size`,
    /// clamped to the number of adjacent-pair slots in the corpus.
    pub fn merge_budget(&self, base_vocab_size: usize, pair_slots: u64) -> usize {
        match (self.vocab_size, self.num_merges) {
            (Some(vocab_size), _) => {
                let wanted = vocab_size.saturating_sub(base_vocab_size);
                wanted.min(usize::try_from(pair_slots).unwrap_or(usize::MAX))
            }
            (None, Some(num_merges)) => num_merges,
            (None, None) => 0,
        }
    }
}

/// Why training stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The requested number of merges was learned
    BudgetReached,
    /// Every word collapsed into a single token
    NoPairs,
    /// The most frequent pair fell below the minimum frequency
    BelowMinFrequency,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetReached => write!(f, "merge budget reached"),
            Self::NoPairs => write!(f, "no pairs left to merge"),
            Self::BelowMinFrequency => write!(f, "best pair below minimum frequency"),
        }
    }
}

/// Artifacts returned after a training session completes.
#[must_use]
#[derive(Debug, Clone)]
pub struct TrainerArtifacts {
    /// Trained vocabulary
    pub vocab: Vocabulary,
    /// Learned merges in rank order
    pub merges: MergeRules,
    /// Why the training loop ended
    pub stop_reason: StopReason,
    /// Merge budget derived from the configuration
    pub budget: usize,
}

/// BPE trainer.
///
/// Trains a BPE tokenizer from pre-split words by iteratively merging the
/// most frequent adjacent symbol pairs.
#[derive(Debug, Clone)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Returns an immutable reference to the underlying configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on a list of words.
    ///
    /// Fails only when the configuration names no training target. Running
    /// out of pairs or frequent pairs ends training early and is reported
    /// through [`TrainerArtifacts::stop_reason`].
    pub fn train<S: AsRef<str>>(&self, words: &[S]) -> Result<TrainerArtifacts> {
        self.config.validate()?;

        let mut vocab = Vocabulary::initialize(words);

        let mut counter = PairCounter::new();
        for word in words {
            counter.add_word(word.as_ref(), &vocab);
        }

        let budget = self.config.merge_budget(vocab.len(), counter.pair_slots());
        log::info!(
            "training on {} words ({} unique), base vocabulary {}, merge budget {}",
            counter.total_word_occurrences(),
            counter.word_count(),
            vocab.len(),
            budget
        );

        let mut merges = MergeRules::with_capacity(budget);
        let mut iteration = 0usize;

        let stop_reason = loop {
            if iteration >= budget {
                break StopReason::BudgetReached;
            }

            let pair_counts = counter.count_pairs();
            let Some((pair, count)) = Self::select_best(&pair_counts, &vocab) else {
                break StopReason::NoPairs;
            };

            if count < self.config.min_frequency {
                break StopReason::BelowMinFrequency;
            }

            let new_token = Self::get_token_string(&vocab, &pair);
            let new_token_id = vocab.add_token(&new_token);
            let rank = merges.push(pair, new_token_id);
            counter.merge_pair_in_words(pair, new_token_id);

            log::debug!(
                "merge {}: {:?} + {:?} -> {:?} (id {}, count {})",
                rank,
                vocab.get_token(pair.0).unwrap_or_default(),
                vocab.get_token(pair.1).unwrap_or_default(),
                new_token,
                new_token_id,
                count
            );

            iteration += 1;
        };

        log::info!(
            "training finished: {} merges, vocabulary {} ({})",
            merges.len(),
            vocab.len(),
            stop_reason
        );

        Ok(TrainerArtifacts {
            vocab,
            merges,
            stop_reason,
            budget,
        })
    }

    /// Pick the most frequent pair.
    ///
    /// Equal counts are broken by the lexicographically smallest
    /// `(left, right)` token strings, which keeps training reproducible.
    fn select_best(pair_counts: &AHashMap<Pair, u64>, vocab: &Vocabulary) -> Option<(Pair, u64)> {
        pair_counts
            .iter()
            .max_by(|(pa, ca), (pb, cb)| {
                ca.cmp(cb)
                    .then_with(|| Self::pair_strings(vocab, pb).cmp(&Self::pair_strings(vocab, pa)))
            })
            .map(|(&pair, &count)| (pair, count))
    }

    fn pair_strings<'a>(vocab: &'a Vocabulary, pair: &Pair) -> (&'a str, &'a str) {
        (
            vocab.get_token(pair.0).unwrap_or_default(),
            vocab.get_token(pair.1).unwrap_or_default(),
        )
    }

    /// Get the token string for a merged pair.
    fn get_token_string(vocab: &Vocabulary, pair: &Pair) -> String {
        let token1 = vocab.get_token(pair.0).unwrap_or("");
        let token2 = vocab.get_token(pair.1).unwrap_or("");
        format!("{}{}", token1, token2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged_strings(artifacts: &TrainerArtifacts) -> Vec<(String, String)> {
        artifacts
            .merges
            .iter()
            .map(|rule| {
                (
                    artifacts.vocab.get_token(rule.pair.0).unwrap().to_string(),
                    artifacts.vocab.get_token(rule.pair.1).unwrap().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_regression_fixture() {
        let trainer = BpeTrainer::new(TrainingConfig::with_num_merges(3));
        let artifacts = trainer.train(&["ab", "bc", "bcd", "cde"]).unwrap();

        assert_eq!(
            merged_strings(&artifacts),
            vec![
                ("<".to_string(), "b".to_string()),
                ("<b".to_string(), "c".to_string()),
            ]
        );
        assert_eq!(artifacts.stop_reason, StopReason::BelowMinFrequency);

        let tokens: Vec<&str> = artifacts
            .vocab
            .entries_by_id()
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        assert_eq!(tokens, vec!["<", ">", " ", "a", "b", "c", "d", "e", "<b", "<bc"]);
    }

    #[test]
    fn test_frequency_floor_stops_with_zero_merges() {
        let trainer = BpeTrainer::new(TrainingConfig::with_num_merges(10));
        let artifacts = trainer.train(&["abc", "def"]).unwrap();

        assert!(artifacts.merges.is_empty());
        assert_eq!(artifacts.stop_reason, StopReason::BelowMinFrequency);
        assert_eq!(artifacts.vocab.len(), 9);
    }

    #[test]
    fn test_budget_reached() {
        let trainer = BpeTrainer::new(TrainingConfig::with_num_merges(1));
        let artifacts = trainer.train(&["ab", "bc", "bcd", "cde"]).unwrap();

        assert_eq!(artifacts.merges.len(), 1);
        assert_eq!(artifacts.stop_reason, StopReason::BudgetReached);
    }

    #[test]
    fn test_no_pairs_when_words_collapse() {
        let trainer = BpeTrainer::new(TrainingConfig::with_num_merges(10));
        let artifacts = trainer.train(&["aa", "aa"]).unwrap();

        // (<,a) -> (<a,a) -> (<aa,>) leaves each word as one token
        assert_eq!(artifacts.merges.len(), 3);
        assert_eq!(artifacts.stop_reason, StopReason::NoPairs);
        assert_eq!(artifacts.vocab.get_id("<aa>"), Some(6));
    }

    #[test]
    fn test_empty_corpus_has_no_pairs() {
        let trainer = BpeTrainer::new(TrainingConfig::with_num_merges(5));
        let artifacts = trainer.train::<&str>(&[]).unwrap();

        assert!(artifacts.merges.is_empty());
        assert_eq!(artifacts.vocab.len(), 3);
        assert_eq!(artifacts.stop_reason, StopReason::NoPairs);
    }

    #[test]
    fn test_vocab_size_target() {
        let trainer = BpeTrainer::new(TrainingConfig::with_vocab_size(9));
        let artifacts = trainer.train(&["aa", "aa"]).unwrap();

        // base vocabulary is < > ␠ a
        assert_eq!(artifacts.budget, 5);
        assert!(artifacts.vocab.len() <= 9);
        assert_eq!(artifacts.merges.len(), 3);
    }

    #[test]
    fn test_vocab_size_below_base_learns_nothing() {
        let trainer = BpeTrainer::new(TrainingConfig::with_vocab_size(2));
        let artifacts = trainer.train(&["hello", "hello"]).unwrap();

        assert_eq!(artifacts.budget, 0);
        assert!(artifacts.merges.is_empty());
        assert_eq!(artifacts.stop_reason, StopReason::BudgetReached);
    }

    #[test]
    fn test_budget_clamped_to_pair_slots() {
        let config = TrainingConfig::with_vocab_size(1_000);
        assert_eq!(config.merge_budget(10, 7), 7);
        assert_eq!(config.merge_budget(10, 10_000), 990);

        let config = TrainingConfig::with_num_merges(50);
        assert_eq!(config.merge_budget(10, 7), 50);
    }

    #[test]
    fn test_missing_target_is_config_error() {
        let trainer = BpeTrainer::new(TrainingConfig::default());
        let result = trainer.train(&["ab"]);
        assert!(matches!(result, Err(TokenizerError::InvalidConfig(_))));
    }

    #[test]
    fn test_both_targets_is_config_error() {
        let config = TrainingConfig {
            vocab_size: Some(100),
            num_merges: Some(10),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_min_frequency_filter() {
        let trainer = BpeTrainer::new(TrainingConfig {
            num_merges: Some(100),
            min_frequency: 100,
            ..Default::default()
        });
        let artifacts = trainer.train(&["hello", "hello", "world"]).unwrap();

        assert!(artifacts.merges.is_empty());
        assert_eq!(artifacts.stop_reason, StopReason::BelowMinFrequency);
    }

    #[test]
    fn test_merge_count_bounded_by_slots() {
        let words = ["low", "lower", "newest", "widest", "low", "newest"];
        let trainer = BpeTrainer::new(TrainingConfig::with_num_merges(1_000));
        let artifacts = trainer.train(&words).unwrap();

        let mut counter = PairCounter::new();
        let base = Vocabulary::initialize(&words);
        for w in words {
            counter.add_word(w, &base);
        }
        assert!(artifacts.merges.len() as u64 <= counter.pair_slots());
        assert!(artifacts
            .merges
            .iter()
            .all(|rule| artifacts.vocab.get_token(rule.new_token_id).is_some()));
    }
}
