//! The live page the reader mode transforms, and the snapshot that reverses it.
//!
//! A [`Page`] stands in for the host's loaded document: its `<body>` markup
//! can be read and replaced wholesale, the way a content script reads and
//! assigns `body.innerHTML`. A [`DocumentSnapshot`] is an exact copy of that
//! markup taken before the reader view replaces it.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use url::Url;

use crate::parse::Document;
use crate::{ReaderError, Result};

/// An already-loaded page whose body markup can be swapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    head: String,
    body: String,
    language: Option<String>,
    url: Option<Url>,
}

impl Page {
    /// Loads a page from full HTML source.
    ///
    /// The body markup is the parser's serialization of `<body>`'s children,
    /// so it matches what a browser would report for the same source.
    pub fn from_html(html: &str) -> Result<Self> {
        let doc = Document::parse(html)?;
        let head = doc
            .select("head")?
            .first()
            .map(|head| head.inner_html())
            .unwrap_or_default();
        let body = doc.body().inner_html();

        Ok(Self { head, body, language: doc.language(), url: None })
    }

    /// Loads a page and records the URL it came from.
    pub fn from_html_with_url(html: &str, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| ReaderError::InvalidUrl(e.to_string()))?;
        let mut page = Self::from_html(html)?;
        page.url = Some(url);
        Ok(page)
    }

    /// Loads a page from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::FileNotFound`] if `path` does not exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_html(&read_file(path)?)
    }

    /// Gets the current body markup.
    pub fn body_html(&self) -> &str {
        &self.body
    }

    /// Replaces the body markup.
    pub fn set_body_html(&mut self, body: String) {
        self.body = body;
    }

    /// Gets the URL the page was loaded from, if known.
    pub fn url(&self) -> Option<&str> {
        self.url.as_ref().map(Url::as_str)
    }

    /// Serializes the whole page with its current body.
    pub fn to_html(&self) -> String {
        let lang = self
            .language
            .as_deref()
            .map(|lang| format!(" lang=\"{}\"", crate::clean::escape_attr(lang)))
            .unwrap_or_default();
        format!("<html{}><head>{}</head><body>{}</body></html>", lang, self.head, self.body)
    }

    /// Parses the page as it currently stands.
    pub fn document(&self) -> Document {
        Document::parse_with_base(&self.to_html(), self.url.clone())
    }

    /// Captures the current body markup.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot { markup: self.body.clone() }
    }

    /// Puts a captured body back, verbatim.
    pub fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.body = snapshot.markup;
    }
}

/// Reads HTML from a file.
///
/// # Errors
///
/// Returns [`ReaderError::FileNotFound`] for a missing path and
/// [`ReaderError::Io`] for any other read failure.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReaderError::FileNotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Reads HTML from standard input until EOF.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// An exact copy of a page's body markup before transformation.
///
/// Immutable once captured; restoring consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    markup: String,
}

impl DocumentSnapshot {
    /// Gets the captured markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }
}
