//! Canonical word keys.
//!
//! A key is the input trimmed, lower-cased, and stripped of every character
//! in the punctuation set. Normalization never fails; an input made only of
//! punctuation and whitespace yields the empty key.

use std::collections::HashSet;

use crate::occurrence::WordInput;

/// ASCII punctuation plus the typographic marks most pages use.
pub const DEFAULT_PUNCTUATION: &str =
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~\u{201C}\u{201D}\u{2018}\u{2019}\u{AB}\u{BB}\u{2026}\u{2013}\u{2014}\u{BF}\u{A1}";

/// Produces canonical keys from text or occurrence nodes.
#[derive(Debug, Clone)]
pub struct Normalizer {
    punctuation: HashSet<char>,
}

impl Normalizer {
    /// Build a normalizer that strips every character of `punctuation`.
    pub fn new(punctuation: &str) -> Self {
        Self {
            punctuation: punctuation.chars().collect(),
        }
    }

    /// Normalize a bare string or a node's text content.
    pub fn normalize(&self, input: &WordInput<'_>) -> String {
        match input {
            WordInput::Text(text) => self.normalize_text(text),
            WordInput::Node(node) => self.normalize_text(&node.text_content()),
        }
    }

    pub fn normalize_text(&self, text: &str) -> String {
        text.trim()
            .to_lowercase()
            .chars()
            .filter(|c| !self.punctuation.contains(c))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PUNCTUATION)
    }
}
