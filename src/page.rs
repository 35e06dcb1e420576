//! Page scanning and highlighted rendering.
//!
//! A page is split into word tokens and the whitespace between them. Each
//! word token becomes a [`TextElement`] resolved through the registry, so
//! it is painted with its word's status the moment it is registered.
//! Tokens that normalize to nothing (stray dashes, ellipses) stay plain
//! text and never enter the dictionary.

use quick_xml::escape::{escape, partial_escape};
use std::collections::HashSet;
use std::sync::Arc;

use webwords_core::projector::STYLESHEET;
use webwords_core::{StatusCounts, TextElement, Word, WordRegistry};

/// One piece of a scanned page.
#[derive(Debug, Clone)]
pub enum Token {
    /// A tracked occurrence.
    Word(Arc<TextElement>),
    /// Whitespace, or text that is not a word.
    Text(String),
}

/// A scanned page, in document order.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub tokens: Vec<Token>,
    /// Distinct words on the page, in order of first appearance.
    pub words: Vec<Arc<Word>>,
}

impl Page {
    /// Status tally over the page's own words.
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.words)
    }

    /// Number of tracked occurrences.
    pub fn occurrence_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t, Token::Word(_)))
            .count()
    }
}

/// Split `text` into tokens and register every word occurrence.
pub fn scan_page(text: &str, registry: &mut WordRegistry) -> Page {
    let mut page = Page::default();
    let mut seen = HashSet::new();

    for (piece, is_space) in split_runs(text) {
        if is_space || registry.normalizer().normalize_text(piece).is_empty() {
            push_text(&mut page, piece);
            continue;
        }
        let element = Arc::new(TextElement::new(piece));
        let word = registry.resolve_node(element.clone(), None);
        if seen.insert(word.text().to_string()) {
            page.words.push(word);
        }
        page.tokens.push(Token::Word(element));
    }

    page
}

fn push_text(page: &mut Page, piece: &str) {
    if let Some(Token::Text(prev)) = page.tokens.last_mut() {
        prev.push_str(piece);
    } else {
        page.tokens.push(Token::Text(piece.to_string()));
    }
}

/// Maximal runs of whitespace and non-whitespace, with a flag for which.
fn split_runs(text: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let is_space = c.is_whitespace();
        match current {
            Some(prev) if prev == is_space => {}
            Some(prev) => {
                runs.push((&text[start..i], prev));
                start = i;
                current = Some(is_space);
            }
            None => current = Some(is_space),
        }
    }
    if let Some(prev) = current {
        runs.push((&text[start..], prev));
    }
    runs
}

/// Render the page body: word tokens as classed spans, the rest escaped.
pub fn render_body(page: &Page) -> String {
    let mut out = String::new();
    for token in &page.tokens {
        match token {
            Token::Word(el) => {
                out.push_str("<span class=\"");
                out.push_str(&escape(el.class_attr().as_str()));
                out.push_str("\">");
                out.push_str(&partial_escape(el.text()));
                out.push_str("</span>");
            }
            Token::Text(text) => out.push_str(&partial_escape(text.as_str())),
        }
    }
    out
}

/// Render a standalone HTML document with the status stylesheet.
pub fn render_html(page: &Page, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n<pre class=\"webwords\">{}</pre>\n</body>\n</html>\n",
        partial_escape(title),
        STYLESHEET,
        render_body(page)
    )
}
