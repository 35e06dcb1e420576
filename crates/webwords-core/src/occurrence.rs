//! Occurrence nodes: the places on a page where a word appears.
//!
//! The registry and projector only need to read a node's text and edit its
//! class list, so [`Occurrence`] is the whole contract. Browser bindings wrap
//! a real element; the CLI and the tests use [`TextElement`].

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// A class-list capable node holding the text of one word occurrence.
///
/// Implementations use interior mutability: the projector paints nodes it
/// only holds shared references to.
pub trait Occurrence: Send + Sync {
    /// The node's visible text.
    fn text_content(&self) -> String;

    /// Add `class`. Adding a class that is already present is a no-op.
    fn add_class(&self, class: &str);

    /// Remove `class`. Removing an absent class is a no-op.
    fn remove_class(&self, class: &str);

    fn has_class(&self, class: &str) -> bool;

    /// Whether the node is still part of its page. Detached nodes are left
    /// alone by the projector.
    fn is_attached(&self) -> bool {
        true
    }
}

/// Input to word resolution: a bare string or an occurrence node.
pub enum WordInput<'a> {
    Text(&'a str),
    Node(Arc<dyn Occurrence>),
}

impl<'a> WordInput<'a> {
    pub fn node<T: Occurrence + 'static>(node: Arc<T>) -> Self {
        WordInput::Node(node)
    }

    pub fn is_node(&self) -> bool {
        matches!(self, WordInput::Node(_))
    }
}

impl<'a> From<&'a str> for WordInput<'a> {
    fn from(text: &'a str) -> Self {
        WordInput::Text(text)
    }
}

impl From<Arc<dyn Occurrence>> for WordInput<'_> {
    fn from(node: Arc<dyn Occurrence>) -> Self {
        WordInput::Node(node)
    }
}

/// In-memory element with an ordered class list.
///
/// Counts effective class mutations so callers can tell whether a repaint
/// actually touched the node.
#[derive(Debug)]
pub struct TextElement {
    text: String,
    classes: RwLock<Vec<String>>,
    attached: AtomicBool,
    mutations: AtomicUsize,
}

impl TextElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            classes: RwLock::new(Vec::new()),
            attached: AtomicBool::new(true),
            mutations: AtomicUsize::new(0),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The class list as an HTML `class` attribute value.
    pub fn class_attr(&self) -> String {
        self.classes().join(" ")
    }

    /// Mark the element as removed from its page.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    /// Number of class additions and removals that changed the list.
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }
}

impl Occurrence for TextElement {
    fn text_content(&self) -> String {
        self.text.clone()
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.classes.write().unwrap_or_else(PoisonError::into_inner);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.mutations.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn remove_class(&self, class: &str) {
        let mut classes = self.classes.write().unwrap_or_else(PoisonError::into_inner);
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.mutations.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|c| c == class)
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}
