//! Serialization and deserialization for BPE models.
//!
//! A model is saved as a loadable `.model` JSON file plus a `.vocab` report
//! listing every token with its id and hex bytes.

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFile, VocabEntry, VocabReport};
pub use load::TokenizerLoader;
pub use save::{SavedPaths, TokenizerSaver};
