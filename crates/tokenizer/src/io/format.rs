//! Format definitions for tokenizer serialization.
//!
//! Two artifacts are written per model: the loadable `.model` file and a
//! human-readable `.vocab` report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wordbpe_core::{Result, TokenizerError};

/// Extension of the machine-loadable model file.
pub const MODEL_EXTENSION: &str = "model";

/// Extension of the vocabulary report.
pub const VOCAB_EXTENSION: &str = "vocab";

/// Persisted model: vocabulary and merges in rank order.
///
/// Merges are stored as raw JSON values so that malformed entries can be
/// reported individually on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    /// Token -> ID mapping
    pub vocab: BTreeMap<String, u32>,
    /// `[left, right]` pairs; rank is the position in the list
    pub merges: Vec<serde_json::Value>,
}

impl ModelFile {
    /// Encode a merge as a `[left, right]` JSON array.
    pub fn merge_entry(left: &str, right: &str) -> serde_json::Value {
        serde_json::Value::Array(vec![left.into(), right.into()])
    }

    /// Parse the merge at `index` back into its two token strings.
    pub fn parse_merge(index: usize, entry: &serde_json::Value) -> Result<(&str, &str)> {
        match entry.as_array().map(Vec::as_slice) {
            Some([serde_json::Value::String(left), serde_json::Value::String(right)]) => {
                Ok((left.as_str(), right.as_str()))
            }
            _ => Err(TokenizerError::InvalidMerge(format!(
                "merge {} must be a [left, right] pair of strings, found {}",
                index, entry
            ))),
        }
    }
}

/// Human-readable vocabulary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabReport {
    pub vocab_size: usize,
    pub merge_count: usize,
    /// Entries sorted by ID
    pub vocab: Vec<VocabEntry>,
}

/// One row of the vocabulary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub id: u32,
    pub token: String,
    /// Lowercase hex of the token's UTF-8 bytes
    pub token_hex: String,
}

impl VocabEntry {
    pub fn new(id: u32, token: &str) -> Self {
        Self {
            id,
            token: token.to_string(),
            token_hex: to_hex(token),
        }
    }
}

fn to_hex(token: &str) -> String {
    token.bytes().map(|b| format!("{:02x}", b)).collect()
}
