//! Save functionality for trained tokenizers.
//!
//! `save(prefix)` writes `<prefix>.model` and `<prefix>.vocab`.

use super::format::{ModelFile, VocabEntry, VocabReport, MODEL_EXTENSION, VOCAB_EXTENSION};
use serde::Serialize;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use wordbpe_core::{MergeRules, Result, TokenizerError, Vocabulary};

/// Paths of the two artifacts written by [`TokenizerSaver::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPaths {
    pub model: PathBuf,
    pub vocab: PathBuf,
}

/// Tokenizer saver - handles saving trained models.
pub struct TokenizerSaver<'a> {
    /// Vocabulary reference
    vocab: &'a Vocabulary,
    /// Merge rules reference
    merges: &'a MergeRules,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver.
    pub fn new(vocab: &'a Vocabulary, merges: &'a MergeRules) -> Self {
        Self { vocab, merges }
    }

    /// Save the model and its vocabulary report next to `prefix`.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, prefix: &Path) -> Result<SavedPaths> {
        if let Some(parent) = prefix.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TokenizerError::io(parent, e))?;
        }

        let paths = SavedPaths {
            model: with_extension_appended(prefix, MODEL_EXTENSION),
            vocab: with_extension_appended(prefix, VOCAB_EXTENSION),
        };

        write_json(&paths.model, &self.model_file())?;
        write_json(&paths.vocab, &self.vocab_report())?;

        log::info!(
            "saved model ({} tokens, {} merges) to {} and {}",
            self.vocab.len(),
            self.merges.len(),
            paths.model.display(),
            paths.vocab.display()
        );

        Ok(paths)
    }

    /// Build the loadable model structure.
    pub fn model_file(&self) -> ModelFile {
        let vocab = self
            .vocab
            .vocab
            .iter()
            .map(|(token, &id)| (token.to_string(), id))
            .collect();

        let merges = self
            .merges
            .iter()
            .map(|rule| {
                ModelFile::merge_entry(
                    self.vocab.get_token(rule.pair.0).unwrap_or_default(),
                    self.vocab.get_token(rule.pair.1).unwrap_or_default(),
                )
            })
            .collect();

        ModelFile { vocab, merges }
    }

    /// Build the human-readable vocabulary report.
    pub fn vocab_report(&self) -> VocabReport {
        VocabReport {
            vocab_size: self.vocab.len(),
            merge_count: self.merges.len(),
            vocab: self
                .vocab
                .entries_by_id()
                .into_iter()
                .map(|(id, token)| VocabEntry::new(id, token))
                .collect(),
        }
    }
}

/// `out/tok` -> `out/tok.model`; an existing extension is kept.
fn with_extension_appended(prefix: &Path, extension: &str) -> PathBuf {
    let mut path = OsString::from(prefix.as_os_str());
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| TokenizerError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
        TokenizerError::Save(format!("Failed to serialize {}: {}", path.display(), e))
    })?;
    writer.flush().map_err(|e| TokenizerError::io(path, e))
}
