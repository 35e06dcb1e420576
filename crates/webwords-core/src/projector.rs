//! Paints a word's learning status onto its occurrences.
//!
//! Every attached occurrence ends up with the [`MARKER_CLASS`] and exactly
//! one status class. Painting is idempotent and the order of class edits
//! does not affect the result.

use crate::word::Word;

/// Class carried by every tracked occurrence.
pub const MARKER_CLASS: &str = "L2";

/// Style rules for the status classes, injected into rendered pages.
pub const STYLESHEET: &str = "\
.L2.unknown {
    border-radius: 2px;
    background-color: yellow;
}
.L2.known:hover {
    border-bottom: 2px solid green;
}
";

/// Apply `word`'s current status to each of its occurrences.
pub fn project(word: &Word) {
    let status = word.learning_status();
    for node in word.occurrences() {
        if !node.is_attached() {
            continue;
        }
        node.add_class(MARKER_CLASS);
        node.add_class(status.as_str());
        for other in status.others() {
            node.remove_class(other.as_str());
        }
    }
}
