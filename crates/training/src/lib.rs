//! wordbpe-training - BPE training infrastructure
//!
//! This crate learns an ordered list of merge rules and the matching
//! vocabulary from pre-split words.
//!
//! # Features
//!
//! - Pair frequency counting over distinct words weighted by occurrence
//! - Vocabulary-size or merge-count training targets with a minimum pair frequency
//! - Deterministic tie-breaking between equally frequent pairs
//!
//! # Example
//!
//! ```rust
//! use wordbpe_training::{BpeTrainer, StopReason, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig::with_num_merges(3));
//! let artifacts = trainer.train(&["ab", "bc", "bcd", "cde"])?;
//!
//! assert_eq!(artifacts.merges.len(), 2);
//! assert_eq!(artifacts.stop_reason, StopReason::BelowMinFrequency);
//! # Ok::<(), wordbpe_training::TokenizerError>(())
//! ```

pub use wordbpe_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    BpeTrainer, PairCounter, StopReason, TrainerArtifacts, TrainingConfig, DEFAULT_MIN_FREQUENCY,
};
