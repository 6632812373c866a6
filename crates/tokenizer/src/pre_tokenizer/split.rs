//! Text splitting for pre-tokenization.
//!
//! Text is first cut at sentence-terminal punctuation, which becomes a unit
//! of its own. Each remaining segment yields maximal runs of word characters
//! and single punctuation/symbol characters. Whitespace only separates.

use regex::Regex;
use std::sync::OnceLock;

/// Sentence-terminal punctuation.
const TERMINAL_PATTERN: &str = r"[.!?]";

/// A run of word characters or a single non-word, non-space character.
const UNIT_PATTERN: &str = r"\w+|[^\w\s]";

fn terminal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TERMINAL_PATTERN).expect("Invalid regex pattern"))
}

fn unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(UNIT_PATTERN).expect("Invalid regex pattern"))
}

/// Word splitter for pre-tokenization.
///
/// The output defines the boundaries BPE merges never cross.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splitter;

impl Splitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self
    }

    /// Split text into word-level units.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut units = Vec::new();
        let mut start = 0;

        for terminal in terminal_regex().find_iter(text) {
            Self::split_segment(&text[start..terminal.start()], &mut units);
            units.push(terminal.as_str().to_string());
            start = terminal.end();
        }
        Self::split_segment(&text[start..], &mut units);

        units
    }

    /// Split every text of a batch and concatenate the units.
    pub fn split_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        texts.iter().flat_map(|t| self.split(t.as_ref())).collect()
    }

    fn split_segment(segment: &str, units: &mut Vec<String>) {
        units.extend(unit_regex().find_iter(segment).map(|m| m.as_str().to_string()));
    }
}
