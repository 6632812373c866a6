//! wordbpe - High-level tokenizer API
//!
//! This crate provides a user-friendly interface for word-level BPE
//! tokenization, integrating all components (splitter, vocabulary, merge
//! rules, encoder) into a single, easy-to-use API.
//!
//! # Features
//!
//! - Simple builder pattern for training configuration
//! - Regex-based word splitting that keeps punctuation as separate words
//! - Lossy encoding that drops characters unseen in training
//! - Saving and loading as JSON model and vocabulary files
//!
//! # Example
//!
//! ```rust
//! use wordbpe::Tokenizer;
//!
//! // Train a tokenizer on a small corpus
//! let tokenizer = Tokenizer::builder()
//!     .num_merges(10)
//!     .train("hello world. hello there, world!")?;
//!
//! // Encode text
//! let ids = tokenizer.encode("hello, world!");
//!
//! // Decode tokens
//! assert_eq!(tokenizer.decode(&ids), "hello, world!");
//! # Ok::<(), wordbpe::TokenizerError>(())
//! ```

// Re-export core types
pub use wordbpe_core::{MergePolicy, Result, TokenizerError, Vocabulary};
pub use wordbpe_training::{StopReason, TrainingConfig, DEFAULT_MIN_FREQUENCY};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// Training input
pub mod corpus;
pub use corpus::{load_corpus, Corpus};

// IO/Serialization
pub mod io;
pub use io::{SavedPaths, TokenizerLoader, TokenizerSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::Splitter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
