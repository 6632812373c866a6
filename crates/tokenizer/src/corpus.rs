//! Training corpus input.
//!
//! A corpus is either one text or a list of texts. Both forms are split into
//! the same flat list of words before training.

use crate::pre_tokenizer::Splitter;
use std::path::Path;
use wordbpe_core::{Result, TokenizerError};

/// Text to train on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    /// A single text
    Single(String),
    /// Several independent texts, e.g. one per line of a file
    Multiple(Vec<String>),
}

impl Corpus {
    /// All texts of the corpus.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Corpus::Single(text) => vec![text.as_str()],
            Corpus::Multiple(texts) => texts.iter().map(String::as_str).collect(),
        }
    }

    /// Split every text into words, in order.
    pub fn words(&self, splitter: &Splitter) -> Vec<String> {
        splitter.split_all(&self.texts())
    }

    /// Whether the corpus holds no text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Corpus::Single(text) => text.is_empty(),
            Corpus::Multiple(texts) => texts.iter().all(String::is_empty),
        }
    }
}

impl From<&str> for Corpus {
    fn from(text: &str) -> Self {
        Corpus::Single(text.to_string())
    }
}

impl From<String> for Corpus {
    fn from(text: String) -> Self {
        Corpus::Single(text)
    }
}

impl From<Vec<String>> for Corpus {
    fn from(texts: Vec<String>) -> Self {
        Corpus::Multiple(texts)
    }
}

impl From<&[&str]> for Corpus {
    fn from(texts: &[&str]) -> Self {
        Corpus::Multiple(texts.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Corpus {
    fn from(texts: [&str; N]) -> Self {
        Corpus::Multiple(texts.iter().map(|t| t.to_string()).collect())
    }
}

/// Read a corpus file, one entry per non-blank line.
///
/// Lines are trimmed; blank lines are skipped.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Corpus> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| TokenizerError::io(path, e))?;

    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    log::info!("loaded {} corpus lines from {}", lines.len(), path.display());
    Ok(Corpus::Multiple(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_single_and_multiple_converge() {
        let splitter = Splitter::new();
        let single = Corpus::from("ab bc. cd");
        let multiple = Corpus::from(["ab bc.", "cd"]);

        assert_eq!(single.words(&splitter), multiple.words(&splitter));
        assert_eq!(single.words(&splitter), vec!["ab", "bc", ".", "cd"]);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Corpus::from("x".to_string()), Corpus::Single("x".to_string()));
        assert_eq!(
            Corpus::from(vec!["a".to_string(), "b".to_string()]),
            Corpus::Multiple(vec!["a".to_string(), "b".to_string()])
        );
        let slice: &[&str] = &["a"];
        assert_eq!(Corpus::from(slice).texts(), vec!["a"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Corpus::from("").is_empty());
        assert!(Corpus::Multiple(vec![]).is_empty());
        assert!(!Corpus::from("a").is_empty());
    }

    #[test]
    fn test_load_corpus_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first line").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "  second line  ").unwrap();
        file.flush().unwrap();

        let corpus = load_corpus(file.path()).unwrap();
        assert_eq!(
            corpus,
            Corpus::Multiple(vec!["first line".to_string(), "second line".to_string()])
        );
    }

    #[test]
    fn test_load_corpus_missing_file() {
        let result = load_corpus("/nonexistent/wordbpe_never_exists.txt");
        assert!(matches!(result, Err(TokenizerError::Io { .. })));
    }
}
