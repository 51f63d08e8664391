//! Main content location.
//!
//! Picks the one element to treat as the article body. Configured selectors
//! are tried in priority order; when none match, the parent holding the most
//! paragraph text wins; when there are no paragraphs, the body itself is used.
//! Locating never fails.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::parse::{Document, Element};

/// Default selector priority list.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[role=\"article\"]",
    "[itemprop=\"articleBody\"]",
    ".post-content",
    ".entry-content",
    ".article-content",
    ".article-body",
    ".post-body",
    "#content",
    ".content",
    "main",
    "[role=\"main\"]",
];

/// How the content root was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "selector", rename_all = "snake_case")]
pub enum LocateStrategy {
    /// Matched one of the configured selectors.
    Selector(String),
    /// Parent with the greatest aggregate paragraph text.
    ParagraphDensity,
    /// Nothing else applied; the whole body.
    Body,
}

/// The located content root.
#[derive(Debug, Clone)]
pub struct LocatedContent<'a> {
    pub element: Element<'a>,
    pub strategy: LocateStrategy,
}

/// Finds the main content root of `doc`.
pub fn locate_main_content<'a, S: AsRef<str>>(doc: &'a Document, selectors: &[S]) -> LocatedContent<'a> {
    for selector in selectors {
        let selector = selector.as_ref();
        match doc.select(selector) {
            Ok(matches) => {
                if let Some(element) = matches.into_iter().next() {
                    debug!(selector, "content located by selector");
                    return LocatedContent { element, strategy: LocateStrategy::Selector(selector.to_string()) };
                }
            }
            Err(e) => warn!(selector, error = %e, "skipping invalid content selector"),
        }
    }

    if let Some(element) = densest_paragraph_parent(doc) {
        debug!(tag = %element.tag_name(), "content located by paragraph density");
        return LocatedContent { element, strategy: LocateStrategy::ParagraphDensity };
    }

    debug!("content located by body fallback");
    LocatedContent { element: doc.body(), strategy: LocateStrategy::Body }
}

/// The parent of a `<p>` whose total text is longest.
///
/// Ties keep the parent met first in document order.
fn densest_paragraph_parent(doc: &Document) -> Option<Element<'_>> {
    let paragraphs = doc.select("p").ok()?;
    let mut seen = HashSet::new();
    let mut best: Option<(Element<'_>, usize)> = None;

    for paragraph in paragraphs {
        let Some(parent) = paragraph.parent() else {
            continue;
        };
        if !seen.insert(parent.as_element_ref().id()) {
            continue;
        }

        let len = parent.text_len();
        if best.as_ref().is_none_or(|(_, best_len)| len > *best_len) {
            best = Some((parent, len));
        }
    }

    best.map(|(element, _)| element)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(html: &str) -> (String, LocateStrategy, String) {
        let doc = Document::parse(html).unwrap();
        let located = locate_main_content(&doc, DEFAULT_CONTENT_SELECTORS);
        (located.element.tag_name(), located.strategy, located.element.attr("id").unwrap_or_default().to_string())
    }

    #[test]
    fn test_article_selector_wins() {
        let (tag, strategy, _) = locate("<div class=\"content\"><p>x</p></div><article><p>Story</p></article>");
        assert_eq!(tag, "article");
        assert_eq!(strategy, LocateStrategy::Selector("article".to_string()));
    }

    #[test]
    fn test_selector_priority_order() {
        let (_, strategy, id) =
            locate(r#"<main id="m"><p>main</p></main><div id="c" class="entry-content"><p>entry</p></div>"#);
        assert_eq!(strategy, LocateStrategy::Selector(".entry-content".to_string()));
        assert_eq!(id, "c");
    }

    #[test]
    fn test_density_fallback_picks_longest_parent() {
        let html = r#"
            <div id="a"><p>short</p></div>
            <div id="b"><p>this paragraph is quite a lot longer</p><p>and has a sibling</p></div>
            <div id="c"><p>medium length text</p></div>
        "#;
        let (_, strategy, id) = locate(html);
        assert_eq!(strategy, LocateStrategy::ParagraphDensity);
        assert_eq!(id, "b");
    }

    #[test]
    fn test_density_fallback_tie_keeps_first() {
        let html = r#"<div id="first"><p>12345</p></div><div id="second"><p>abcde</p></div>"#;
        let (_, _, id) = locate(html);
        assert_eq!(id, "first");
    }

    #[test]
    fn test_body_fallback_without_paragraphs() {
        let (tag, strategy, _) = locate("<div><span>no paragraphs here</span></div>");
        assert_eq!(tag, "body");
        assert_eq!(strategy, LocateStrategy::Body);
    }

    #[test]
    fn test_invalid_selector_is_skipped() {
        let doc = Document::parse("<section id=\"s\"><p>x</p></section>").unwrap();
        let located = locate_main_content(&doc, &["[[broken", "section"]);
        assert_eq!(located.strategy, LocateStrategy::Selector("section".to_string()));
    }

    #[test]
    fn test_strategy_serializes_tagged() {
        let value = serde_json::to_value(LocateStrategy::Selector("main".to_string())).unwrap();
        assert_eq!(value["kind"], "selector");
        assert_eq!(value["selector"], "main");
        let value = serde_json::to_value(LocateStrategy::Body).unwrap();
        assert_eq!(value["kind"], "body");
    }
}
