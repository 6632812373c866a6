//! Pre-tokenization pipeline.
//!
//! Splits raw text into the word-level units that training and encoding
//! operate on.

pub mod split;

pub use split::Splitter;
