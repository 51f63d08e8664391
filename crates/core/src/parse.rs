//! Read-only view over a loaded page.
//!
//! [`Document`] owns the parsed tree; [`Element`] is a cheap handle into it.
//! Nothing in the reader pipeline mutates a document. The page body is
//! swapped as markup by [`crate::page::Page`] instead.
//!
//! # Example
//!
//! ```rust
//! use cleanreader_core::parse::Document;
//!
//! let doc = Document::parse("<nav>Menu</nav><article><h1>Tides</h1><p>Low water</p></article>").unwrap();
//! let articles = doc.select("article").unwrap();
//! assert_eq!(articles[0].tag_name(), "article");
//! assert_eq!(doc.body().tag_name(), "body");
//! ```

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{ReaderError, Result};

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ReaderError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A parsed page, optionally tied to the URL it was loaded from.
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses a full HTML page.
    ///
    /// The HTML5 parser repairs malformed markup the way a browser does, so
    /// this never rejects input. It returns `Result` to match the URL variant.
    pub fn parse(html: &str) -> Result<Self> {
        Ok(Self::parse_with_base(html, None))
    }

    /// Parses a page and records its source URL for link resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidUrl`] if `url` does not parse.
    pub fn parse_with_url(html: &str, url: &str) -> Result<Self> {
        let base_url = Url::parse(url).map_err(|e| ReaderError::InvalidUrl(e.to_string()))?;
        Ok(Self::parse_with_base(html, Some(base_url)))
    }

    pub(crate) fn parse_with_base(html: &str, base_url: Option<Url>) -> Self {
        Self { html: Html::parse_document(html), base_url }
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// All elements matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// The `<body>` element, or the root element if there is none.
    pub fn body(&self) -> Element<'_> {
        self.select("body")
            .ok()
            .and_then(|bodies| bodies.into_iter().next())
            .unwrap_or_else(|| Element::new(self.html.root_element()))
    }

    /// Text of the `<title>` element.
    pub fn title(&self) -> Option<String> {
        self.select("title").ok()?.first().map(Element::text)
    }

    /// Non-empty `lang` attribute of `<html>`.
    pub fn language(&self) -> Option<String> {
        self.html
            .root_element()
            .value()
            .attr("lang")
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    }
}

/// Handle to one element of a [`Document`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// The underlying scraper reference, for walks over mixed child nodes.
    pub fn as_element_ref(&self) -> ElementRef<'a> {
        self.element
    }

    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Concatenated descendant text.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Length of [`Element::text`] in characters, without allocating it.
    pub fn text_len(&self) -> usize {
        self.element.text().map(|t| t.chars().count()).sum()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Parent element. `None` at the root.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Element::new)
    }

    /// Whether both handles point at the same node.
    pub fn same_node(&self, other: &Element<'_>) -> bool {
        self.element.id() == other.element.id()
    }
}
