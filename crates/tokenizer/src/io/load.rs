//! Load functionality for pre-trained tokenizers.
//!
//! Reads a `.model` file back into a vocabulary and a rank-ordered merge
//! list. Rank is the position of a merge in the file.

use super::format::ModelFile;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use wordbpe_core::{MergeRules, Result, TokenizerError, Vocabulary};

/// Tokenizer loader - handles loading trained models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load a model from a `.model` file.
    ///
    /// # Arguments
    /// * `path` - Path of the model file
    pub fn load(path: &Path) -> Result<(Vocabulary, MergeRules)> {
        let file = File::open(path).map_err(|e| TokenizerError::io(path, e))?;

        let reader = BufReader::new(file);
        let model: ModelFile = serde_json::from_reader(reader).map_err(|e| {
            TokenizerError::Load(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let (vocab, merges) = Self::deserialize(&model)?;
        log::info!(
            "loaded model from {} ({} tokens, {} merges)",
            path.display(),
            vocab.len(),
            merges.len()
        );
        Ok((vocab, merges))
    }

    /// Rebuild vocabulary and merges from a parsed model file.
    pub fn deserialize(model: &ModelFile) -> Result<(Vocabulary, MergeRules)> {
        let mut vocab = Vocabulary::with_capacity(model.vocab.len());
        for (token, &id) in &model.vocab {
            vocab.add_token_with_id(token, id)?;
        }
        vocab.validate()?;

        let mut merges = MergeRules::with_capacity(model.merges.len());
        for (index, entry) in model.merges.iter().enumerate() {
            let (left, right) = ModelFile::parse_merge(index, entry)?;

            let lookup = |token: &str| {
                vocab.get_id(token).ok_or_else(|| {
                    TokenizerError::InvalidMerge(format!(
                        "merge {} refers to unknown token {:?}",
                        index, token
                    ))
                })
            };
            let pair = (lookup(left)?, lookup(right)?);
            let new_token_id = lookup(&format!("{}{}", left, right))?;

            if merges.contains(pair) {
                return Err(TokenizerError::InvalidMerge(format!(
                    "merge {} repeats an earlier merge {:?} + {:?}",
                    index, left, right
                )));
            }
            merges.push(pair, new_token_id);
        }

        Ok((vocab, merges))
    }
}
