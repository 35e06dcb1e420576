//! Session-scoped word dictionary.
//!
//! A [`WordRegistry`] maps canonical text to the single [`Word`] carrying
//! that text. It is created per page session and passed explicitly to
//! whatever scans or synchronizes; [`reset`](WordRegistry::reset) starts a
//! fresh session.

use std::collections::HashMap;
use std::sync::Arc;

use crate::normalize::Normalizer;
use crate::occurrence::{Occurrence, WordInput};
use crate::status::LearningStatus;
use crate::word::Word;

/// Per-status word tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub known: usize,
    pub unknown: usize,
    pub unverified: usize,
}

impl StatusCounts {
    /// Tally the current status of each word in `words`.
    pub fn tally<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<Word>>,
    {
        let mut counts = Self::default();
        for word in words {
            match word.learning_status() {
                LearningStatus::Known => counts.known += 1,
                LearningStatus::Unknown => counts.unknown += 1,
                LearningStatus::Unverified => counts.unverified += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.known + self.unknown + self.unverified
    }
}

pub struct WordRegistry {
    normalizer: Normalizer,
    words: HashMap<String, Arc<Word>>,
}

impl WordRegistry {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            words: HashMap::new(),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Forget every word.
    pub fn reset(&mut self) {
        self.words.clear();
    }

    /// Find the word for `input`, creating it on first sight.
    ///
    /// A supplied `status` that differs from the word's current one is
    /// applied and repainted. A node input is appended to the word's
    /// occurrences and painted. Never fails: input that normalizes to the
    /// empty string resolves to the empty word.
    pub fn resolve_or_create(
        &mut self,
        input: WordInput<'_>,
        status: Option<LearningStatus>,
    ) -> Arc<Word> {
        let key = self.normalizer.normalize(&input);
        let word = self
            .words
            .entry(key)
            .or_insert_with_key(|key| {
                Arc::new(Word::new(key.clone(), status.unwrap_or_default()))
            })
            .clone();

        if let Some(status) = status {
            word.set_status(status);
        }

        if let WordInput::Node(node) = input {
            word.add_occurrence(node);
        }

        word
    }

    pub fn resolve_text(&mut self, text: &str, status: Option<LearningStatus>) -> Arc<Word> {
        self.resolve_or_create(WordInput::Text(text), status)
    }

    pub fn resolve_node<T: Occurrence + 'static>(
        &mut self,
        node: Arc<T>,
        status: Option<LearningStatus>,
    ) -> Arc<Word> {
        self.resolve_or_create(WordInput::node(node), status)
    }

    /// Look up a word without creating it. `text` is normalized first.
    pub fn get(&self, text: &str) -> Option<Arc<Word>> {
        self.words.get(&self.normalizer.normalize_text(text)).cloned()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words, sorted by text.
    pub fn words(&self) -> Vec<Arc<Word>> {
        let mut words: Vec<Arc<Word>> = self.words.values().cloned().collect();
        words.sort_by(|a, b| a.text().cmp(b.text()));
        words
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(self.words.values())
    }
}

impl Default for WordRegistry {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}
