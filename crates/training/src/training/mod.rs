//! Training infrastructure for BPE tokenizers.
//!
//! This module provides the merge learner and the pair statistics it is
//! built on.

pub mod counter;
pub mod trainer;

pub use counter::PairCounter;
pub use trainer::{BpeTrainer, StopReason, TrainerArtifacts, TrainingConfig, DEFAULT_MIN_FREQUENCY};
