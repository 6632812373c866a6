//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that integrates
//! the word splitter, vocabulary, merge rules and word-level encoder.
//!
//! A `Tokenizer` is only ever produced by training or by loading a saved
//! model. It offers no way to change its vocabulary or merges afterwards,
//! so it can be shared across threads without locking.

use crate::corpus::Corpus;
use crate::io::{SavedPaths, TokenizerLoader, TokenizerSaver};
use crate::pre_tokenizer::Splitter;
use std::path::Path;
use std::sync::Arc;
use wordbpe_core::{MergePolicy, MergeRules, Result, Vocabulary, WordLevelEncoder};
use wordbpe_training::{BpeTrainer, StopReason, TrainingConfig};

/// Configuration for training a tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Training targets and minimum pair frequency
    pub training: TrainingConfig,
    /// How merges are applied when encoding
    pub merge_policy: MergePolicy,
}

/// Builder for training a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.training.vocab_size = Some(size);
        self
    }

    /// Set the target number of merges.
    pub fn num_merges(mut self, merges: usize) -> Self {
        self.config.training.num_merges = Some(merges);
        self
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.training.min_frequency = freq;
        self
    }

    /// Set the merge application policy used for encoding.
    pub fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.config.merge_policy = policy;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Finish building and return the configuration.
    pub fn build_config(self) -> TokenizerConfig {
        self.config
    }

    /// Train a tokenizer on `corpus` with this configuration.
    pub fn train(self, corpus: impl Into<Corpus>) -> Result<Tokenizer> {
        Tokenizer::train(corpus, &self.config)
    }
}

/// Main tokenizer struct.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Vocabulary
    vocab: Arc<Vocabulary>,
    /// Merge rules
    merges: Arc<MergeRules>,
    /// Word-level encoder sharing `vocab` and `merges`
    encoder: WordLevelEncoder,
    /// Text splitter
    splitter: Splitter,
}

impl Tokenizer {
    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Train a new tokenizer.
    ///
    /// Fails with [`TokenizerError::InvalidConfig`](wordbpe_core::TokenizerError::InvalidConfig)
    /// unless exactly one of vocabulary size and merge count is configured.
    pub fn train(corpus: impl Into<Corpus>, config: &TokenizerConfig) -> Result<Self> {
        let (tokenizer, _) = Self::train_with_report(corpus, config)?;
        Ok(tokenizer)
    }

    /// Train a new tokenizer and also return why training stopped.
    pub fn train_with_report(
        corpus: impl Into<Corpus>,
        config: &TokenizerConfig,
    ) -> Result<(Self, StopReason)> {
        config.training.validate()?;

        let splitter = Splitter::new();
        let words = corpus.into().words(&splitter);

        let trainer = BpeTrainer::new(config.training.clone());
        let artifacts = trainer.train(&words)?;

        let tokenizer = Self::from_parts(artifacts.vocab, artifacts.merges, config.merge_policy);
        Ok((tokenizer, artifacts.stop_reason))
    }

    /// Assemble a tokenizer from a vocabulary and merge rules.
    pub fn from_parts(vocab: Vocabulary, merges: MergeRules, policy: MergePolicy) -> Self {
        let vocab = Arc::new(vocab);
        let merges = Arc::new(merges);
        let encoder = WordLevelEncoder::with_arcs(vocab.clone(), merges.clone(), policy);

        Self {
            vocab,
            merges,
            encoder,
            splitter: Splitter::new(),
        }
    }

    /// A tokenizer sharing this one's model but applying merges with `policy`.
    pub fn with_merge_policy(&self, policy: MergePolicy) -> Self {
        Self {
            vocab: self.vocab.clone(),
            merges: self.merges.clone(),
            encoder: WordLevelEncoder::with_arcs(self.vocab.clone(), self.merges.clone(), policy),
            splitter: self.splitter,
        }
    }

    /// Encode text to token IDs.
    ///
    /// Characters outside the vocabulary are dropped without error.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let words = self.splitter.split(text);
        self.encoder.encode_words(&words)
    }

    /// Encode text and return the token strings instead of IDs.
    pub fn tokenize(&self, text: &str) -> Vec<&str> {
        self.encode(text)
            .into_iter()
            .filter_map(|id| self.vocab.get_token(id))
            .collect()
    }

    /// Decode token IDs back to text.
    ///
    /// IDs outside the vocabulary are skipped.
    pub fn decode(&self, ids: &[u32]) -> String {
        self.encoder.decode(ids)
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get the number of learned merges.
    pub fn merge_count(&self) -> usize {
        self.merges.len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the merge rules.
    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// Merges as token strings, in rank order.
    pub fn merge_pairs(&self) -> Vec<(&str, &str)> {
        self.merges
            .iter()
            .map(|rule| {
                (
                    self.vocab.get_token(rule.pair.0).unwrap_or_default(),
                    self.vocab.get_token(rule.pair.1).unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Look up the ID of a token.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.vocab.get_id(token)
    }

    /// Look up the token for an ID.
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.vocab.get_token(id)
    }

    /// The merge policy used by [`encode`](Self::encode).
    pub fn merge_policy(&self) -> MergePolicy {
        self.encoder.policy()
    }

    /// Save the tokenizer as `<prefix>.model` and `<prefix>.vocab`.
    ///
    /// # Arguments
    /// * `prefix` - Path prefix of the two output files
    pub fn save(&self, prefix: impl AsRef<Path>) -> Result<SavedPaths> {
        TokenizerSaver::new(&self.vocab, &self.merges).save(prefix.as_ref())
    }

    /// Load a tokenizer from a `.model` file.
    ///
    /// The merge policy is not persisted; the loaded tokenizer uses the
    /// default policy. See [`with_merge_policy`](Self::with_merge_policy).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let (vocab, merges) = TokenizerLoader::load(path.as_ref())?;
        Ok(Self::from_parts(vocab, merges, MergePolicy::default()))
    }
}
