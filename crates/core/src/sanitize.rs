//! Recursive rebuild of a located subtree into the clean markup subset.
//!
//! The walk is depth-first and pre-order over the source children. Noise is
//! pruned whole, allowed tags keep their kind, everything else degrades to a
//! paragraph container, and empty shells are dropped bottom-up. Headings are
//! recorded on the way down so their anchors follow document order.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node};
use serde::Serialize;
use tracing::trace;
use url::Url;

use crate::clean::{CleanElement, CleanNode, CleanTag};
use crate::parse::Element;
use crate::style::{StyleResolver, preserved_style};
use crate::toc::{HeadingCollector, HeadingRecord};

/// Tags pruned together with their whole subtree.
pub const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "iframe", "frame", "frameset",
    "embed", "object", "ins", "form", "button", "input", "select", "textarea", "svg", "canvas",
];

/// Class keywords that mark an element as page chrome.
static NOISE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nav|menu|sidebar|ad|header|footer|comment").expect("valid regex"));

/// `rel` forced onto every link so the target page gets no handle back.
pub const SAFE_LINK_REL: &str = "noopener noreferrer";

/// Whether an element is pruned along with everything below it.
pub fn is_skipped(tag_name: &str, class: Option<&str>) -> bool {
    if SKIPPED_TAGS.contains(&tag_name) {
        return true;
    }
    class.is_some_and(|class| NOISE_CLASS.is_match(class))
}

/// Whether a link or image URL would run script when followed.
///
/// Browsers ignore embedded whitespace and control characters in the scheme,
/// so those are stripped before comparing.
pub fn is_script_url(value: &str) -> bool {
    let scheme: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take_while(|c| *c != ':')
        .collect();
    scheme.eq_ignore_ascii_case("javascript") || scheme.eq_ignore_ascii_case("vbscript")
}

/// Output of one sanitization pass.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedContent {
    /// Children of the fresh root container.
    pub nodes: Vec<CleanNode>,
    /// Headings in document order.
    pub headings: Vec<HeadingRecord>,
}

impl SanitizedContent {
    /// Concatenated text of the whole tree.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for node in &self.nodes {
            match node {
                CleanNode::Text(t) => text.push_str(t),
                CleanNode::Element(el) => text.push_str(&el.text_content()),
            }
        }
        text
    }

    /// Serializes the nodes without the root container.
    pub fn inner_html(&self) -> String {
        let mut html = String::new();
        for node in &self.nodes {
            node.write_html(&mut html);
        }
        html
    }
}

/// One-shot tree rebuilder.
pub struct Sanitizer<'r> {
    styles: &'r dyn StyleResolver,
    base_url: Option<&'r Url>,
    headings: HeadingCollector,
}

impl<'r> Sanitizer<'r> {
    pub fn new(styles: &'r dyn StyleResolver) -> Self {
        Self { styles, base_url: None, headings: HeadingCollector::new() }
    }

    /// Resolve relative `href`/`src` values against `base_url`.
    pub fn with_base_url(mut self, base_url: Option<&'r Url>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Rebuilds the children of `root` into a fresh tree.
    pub fn sanitize(mut self, root: &Element<'_>) -> SanitizedContent {
        let mut nodes = Vec::new();
        self.visit_children(root.as_element_ref(), &mut nodes);
        SanitizedContent { nodes, headings: self.headings.into_records() }
    }

    fn visit_children(&mut self, source: ElementRef<'_>, out: &mut Vec<CleanNode>) {
        for child in source.children() {
            match child.value() {
                Node::Text(text) => {
                    let text: &str = text;
                    if !text.trim().is_empty() {
                        out.push(CleanNode::Text(text.to_string()));
                    }
                }
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        self.visit_element(Element::new(element), out);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_element(&mut self, source: Element<'_>, out: &mut Vec<CleanNode>) {
        let tag_name = source.tag_name();
        if is_skipped(&tag_name, source.attr("class")) {
            trace!(tag = %tag_name, class = source.attr("class").unwrap_or_default(), "pruned subtree");
            return;
        }

        let tag = CleanTag::from_source(&tag_name);
        let mut clean = CleanElement::new(tag);

        let heading = tag.heading_level().map(|level| {
            let (index, id) = self.headings.reserve(level);
            clean.set_attr("id", id);
            index
        });

        match tag {
            CleanTag::Image => {
                if let Some(src) = source.attr("src").filter(|src| !is_script_url(src)) {
                    clean.set_attr("src", self.resolve_url(src));
                }
                if let Some(alt) = source.attr("alt") {
                    clean.set_attr("alt", alt);
                }
            }
            CleanTag::Link => {
                if let Some(href) = source.attr("href").filter(|href| !is_script_url(href)) {
                    clean.set_attr("href", self.resolve_url(href));
                }
                clean.set_attr("target", "_blank");
                clean.set_attr("rel", SAFE_LINK_REL);
            }
            _ => {}
        }

        if let Some(style) = preserved_style(self.styles, &source) {
            clean.set_attr("style", style);
        }

        if tag != CleanTag::Image {
            self.visit_children(source.as_element_ref(), &mut clean.children);
        }

        if let Some(index) = heading {
            self.headings.set_text(index, &clean.text_content());
        }

        if clean.is_retained() {
            out.push(CleanNode::Element(clean));
        }
    }

    fn resolve_url(&self, value: &str) -> String {
        match self.base_url {
            Some(base) => base.join(value).map(|u| u.to_string()).unwrap_or_else(|_| value.to_string()),
            None => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use crate::style::InlineStyleResolver;
    use rstest::rstest;

    fn sanitize_body(html: &str) -> SanitizedContent {
        let doc = Document::parse(html).unwrap();
        Sanitizer::new(&InlineStyleResolver).sanitize(&doc.body())
    }

    #[rstest]
    #[case("nav", None, true)]
    #[case("script", None, true)]
    #[case("iframe", None, true)]
    #[case("div", Some("sidebar-widget"), true)]
    #[case("div", Some("Main-MENU"), true)]
    #[case("section", Some("comments"), true)]
    #[case("div", Some("article-body"), false)]
    #[case("p", None, false)]
    fn test_skip_policy(#[case] tag: &str, #[case] class: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_skipped(tag, class), expected);
    }

    #[test]
    fn test_skipped_subtrees_are_absent() {
        let content = sanitize_body(
            r#"<nav><p>Home</p></nav>
               <div class="sidebar-widget"><p>Popular posts</p><img src="x.png"></div>
               <p>Body text</p>"#,
        );
        let html = content.inner_html();
        assert!(!html.contains("Home"));
        assert!(!html.contains("Popular"));
        assert!(!html.contains("x.png"));
        assert_eq!(html, "<p>Body text</p>");
    }

    #[test]
    fn test_div_degrades_to_paragraph() {
        let content = sanitize_body("<div>Plain div text</div>");
        assert_eq!(content.inner_html(), "<p>Plain div text</p>");
        assert!(!content.inner_html().contains("<div"));
    }

    #[test]
    fn test_empty_shell_is_pruned() {
        let content = sanitize_body(r#"<section><script>var a;</script><nav>links</nav></section><p>kept</p>"#);
        assert_eq!(content.nodes.len(), 1);
        assert_eq!(content.inner_html(), "<p>kept</p>");
    }

    #[test]
    fn test_whitespace_text_nodes_dropped() {
        let content = sanitize_body("<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>");
        assert_eq!(content.inner_html(), "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn test_headings_recorded_in_order() {
        let content = sanitize_body("<h1>Top</h1><div><h2>Inner</h2><p>text</p></div><h3>Last</h3>");
        let ids: Vec<_> = content.headings.iter().map(|h| (h.level, h.text.as_str(), h.id.as_str())).collect();
        assert_eq!(ids, vec![(1, "Top", "heading-0"), (2, "Inner", "heading-1"), (3, "Last", "heading-2")]);
        assert!(content.inner_html().starts_with("<h1 id=\"heading-0\">Top</h1>"));
    }

    #[test]
    fn test_heading_text_excludes_pruned_children() {
        let content = sanitize_body(
            r#"<h2>Title<span class="ad-badge">Sponsored</span><script>var x=1</script></h2><h3>Next <em>up</em></h3>"#,
        );
        let texts: Vec<_> = content.headings.iter().map(|h| (h.id.as_str(), h.text.as_str())).collect();
        assert_eq!(texts, vec![("heading-0", "Title"), ("heading-1", "Next up")]);
        assert!(content.inner_html().starts_with("<h2 id=\"heading-0\">Title</h2>"));
    }

    #[test]
    fn test_empty_heading_recorded_but_not_rendered() {
        let content = sanitize_body("<h2>   </h2><p>after</p>");
        assert_eq!(content.headings.len(), 1);
        assert_eq!(content.headings[0].text, "");
        assert_eq!(content.inner_html(), "<p>after</p>");
    }

    #[test]
    fn test_skipped_heading_not_recorded() {
        let content = sanitize_body("<header><h1>Site name</h1></header><h1>Story</h1>");
        assert_eq!(content.headings.len(), 1);
        assert_eq!(content.headings[0].text, "Story");
        assert_eq!(content.headings[0].id, "heading-0");
    }

    #[test]
    fn test_image_copies_only_src_and_alt() {
        let content = sanitize_body(r#"<img src="a.png" alt="An A" width="10" onload="evil()" class="hero">"#);
        assert_eq!(content.inner_html(), "<img src=\"a.png\" alt=\"An A\">");
    }

    #[test]
    fn test_link_gets_safe_attributes() {
        let content = sanitize_body(r#"<p><a href="https://x.test/" onclick="evil()" target="_self">go</a></p>"#);
        assert_eq!(
            content.inner_html(),
            "<p><a href=\"https://x.test/\" target=\"_blank\" rel=\"noopener noreferrer\">go</a></p>"
        );
    }

    #[rstest]
    #[case("javascript:alert(1)", true)]
    #[case("  JavaScript:void(0)", true)]
    #[case("java\tscript:alert(1)", true)]
    #[case("vbscript:msgbox", true)]
    #[case("https://example.com/javascript:", false)]
    #[case("/guides/tides", false)]
    #[case("#heading-1", false)]
    fn test_script_url_detection(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_script_url(url), expected);
    }

    #[test]
    fn test_script_urls_dropped() {
        let content = sanitize_body(r#"<p><a href="javascript:alert(1)">click</a><img src=" javascript:x()" alt="x"></p>"#);
        assert_eq!(
            content.inner_html(),
            "<p><a target=\"_blank\" rel=\"noopener noreferrer\">click</a><img alt=\"x\"></p>"
        );
    }

    #[test]
    fn test_relative_urls_resolved_with_base() {
        let doc = Document::parse(r#"<p><a href="/about">About</a></p><img src="pic.jpg">"#).unwrap();
        let base = Url::parse("https://example.com/blog/post").unwrap();
        let content = Sanitizer::new(&InlineStyleResolver)
            .with_base_url(Some(&base))
            .sanitize(&doc.body());
        let html = content.inner_html();
        assert!(html.contains("href=\"https://example.com/about\""));
        assert!(html.contains("src=\"https://example.com/blog/pic.jpg\""));
    }

    #[test]
    fn test_css_emphasis_preserved() {
        let content = sanitize_body(r#"<p>a <span style="font-weight: bold; color: red">loud</span> word</p>"#);
        assert_eq!(content.inner_html(), "<p>a <p style=\"font-weight: bold\">loud</p> word</p>");
    }

    #[test]
    fn test_comments_ignored_and_text_escaped() {
        let content = sanitize_body("<p><!-- hidden -->1 &lt; 2</p>");
        assert_eq!(content.inner_html(), "<p>1 &lt; 2</p>");
        assert_eq!(content.text_content(), "1 < 2");
    }

    #[test]
    fn test_attributes_not_copied_from_generic_elements() {
        let content = sanitize_body(r#"<div id="x" class="story" onclick="evil()">Story</div>"#);
        assert_eq!(content.inner_html(), "<p>Story</p>");
    }
}
