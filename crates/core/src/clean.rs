//! The sanitized markup tree.
//!
//! A [`CleanNode`] tree is built fresh by the sanitizer; it never points back
//! into the source document. Every element carries a [`CleanTag`] from a closed
//! set, resolved once from the source tag name.

use serde::Serialize;

/// The closed set of element kinds the sanitized tree may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanTag {
    Paragraph,
    /// Heading level 1 through 6.
    Heading(u8),
    Image,
    Link,
    Emphasis,
    Strong,
    /// Inline code.
    Code,
    /// Preformatted code block.
    CodeBlock,
    Quote,
    List { ordered: bool },
    ListItem,
    /// Any source tag outside the allow-list. Rendered as a paragraph.
    Generic,
}

impl CleanTag {
    /// Resolves a lowercase source tag name.
    pub fn from_source(tag_name: &str) -> Self {
        match tag_name {
            "p" => Self::Paragraph,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "img" => Self::Image,
            "a" => Self::Link,
            "em" => Self::Emphasis,
            "strong" => Self::Strong,
            "code" => Self::Code,
            "pre" => Self::CodeBlock,
            "blockquote" => Self::Quote,
            "ul" => Self::List { ordered: false },
            "ol" => Self::List { ordered: true },
            "li" => Self::ListItem,
            _ => Self::Generic,
        }
    }

    /// The tag name written to output markup.
    pub fn html_name(&self) -> &'static str {
        match self {
            Self::Paragraph | Self::Generic => "p",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::Image => "img",
            Self::Link => "a",
            Self::Emphasis => "em",
            Self::Strong => "strong",
            Self::Code => "code",
            Self::CodeBlock => "pre",
            Self::Quote => "blockquote",
            Self::List { ordered: true } => "ol",
            Self::List { ordered: false } => "ul",
            Self::ListItem => "li",
        }
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::Heading(level) => Some(*level),
            _ => None,
        }
    }

    /// Void elements take no children and have no closing tag.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Image)
    }
}

/// A rebuilt element of the sanitized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanElement {
    pub tag: CleanTag,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<CleanNode>,
}

impl CleanElement {
    pub fn new(tag: CleanTag) -> Self {
        Self { tag, attrs: Vec::new(), children: Vec::new() }
    }

    /// Sets an attribute, replacing any earlier value for the same name.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the sanitizer should keep this element in its parent.
    pub fn is_retained(&self) -> bool {
        self.tag == CleanTag::Image || self.has_text()
    }

    /// True if any descendant text node has non-whitespace content.
    pub fn has_text(&self) -> bool {
        self.children.iter().any(CleanNode::has_text)
    }

    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            child.collect_text(&mut text);
        }
        text
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag.html_name());
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');

        if self.tag.is_void() {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag.html_name());
        out.push('>');
    }
}

/// A node of the sanitized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanNode {
    Element(CleanElement),
    Text(String),
}

impl CleanNode {
    pub fn has_text(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::Element(element) => element.has_text(),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_text(text)),
            Self::Element(element) => element.write_html(out),
        }
    }

    /// Depth-first, pre-order iterator over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order walk over a [`CleanNode`] subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a CleanNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a CleanNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let CleanNode::Element(element) = node {
            self.stack.extend(element.children.iter().rev());
        }
        Some(node)
    }
}

/// Escape text content for HTML output.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape an attribute value for double-quoted HTML output.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
