//! Reader pipeline: locate, sanitize, measure.
//!
//! The main entry point is the [`Reader`] struct, along with the convenience
//! functions [`extract`] and [`extract_with_url`].
//!
//! # Example
//!
//! ```rust
//! use cleanreader_core::reader::extract;
//!
//! let html = "<html><body><nav>Menu</nav><article><h1>Title</h1><p>Hello world</p></article></body></html>";
//! let article = extract(html).unwrap();
//! assert_eq!(article.headings.len(), 1);
//! assert_eq!(article.metrics.reading_time_minutes, 1);
//! ```

use tracing::debug;
use url::Url;

use crate::article::Article;
use crate::locate::{DEFAULT_CONTENT_SELECTORS, locate_main_content};
use crate::metrics::{DEFAULT_CHARS_PER_MINUTE, ReadingMetrics};
use crate::parse::Document;
use crate::sanitize::Sanitizer;
use crate::style::{InlineStyleResolver, StyleResolver};
use crate::{ReaderError, Result};

/// Configuration for the reader pipeline.
///
/// # Example
///
/// ```rust
/// use cleanreader_core::ReaderConfig;
///
/// let config = ReaderConfig::builder()
///     .chars_per_minute(300)
///     .toc_indent_unit(16)
///     .build();
/// assert_eq!(config.chars_per_minute, 300);
/// ```
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Selectors tried in order to find the content root.
    pub content_selectors: Vec<String>,

    /// Reading speed for the time estimate (default: 400).
    pub chars_per_minute: usize,

    /// TOC indentation per heading level, in pixels (default: 20).
    pub toc_indent_unit: u32,

    /// Intersection ratio at which a heading becomes active (default: 0.5).
    pub active_heading_threshold: f64,

    /// Base URL for resolving relative links and images (default: none).
    pub base_url: Option<Url>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            content_selectors: DEFAULT_CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            chars_per_minute: DEFAULT_CHARS_PER_MINUTE,
            toc_indent_unit: 20,
            active_heading_threshold: 0.5,
            base_url: None,
        }
    }
}

impl ReaderConfig {
    /// Creates a new builder for ReaderConfig.
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::new()
    }
}

/// Builder for ReaderConfig.
pub struct ReaderConfigBuilder {
    config: ReaderConfig,
}

impl ReaderConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ReaderConfig::default() }
    }

    /// Replaces the content selector priority list.
    pub fn content_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.content_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the reading speed. Zero is treated as one.
    pub fn chars_per_minute(mut self, value: usize) -> Self {
        self.config.chars_per_minute = value.max(1);
        self
    }

    /// Sets the TOC indentation unit.
    pub fn toc_indent_unit(mut self, value: u32) -> Self {
        self.config.toc_indent_unit = value;
        self
    }

    /// Sets the active-heading intersection threshold, clamped to 0..=1.
    pub fn active_heading_threshold(mut self, value: f64) -> Self {
        self.config.active_heading_threshold = value.clamp(0.0, 1.0);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, value: Url) -> Self {
        self.config.base_url = Some(value);
        self
    }

    /// Parses and sets the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidUrl`] if `value` does not parse.
    pub fn base_url_str(self, value: &str) -> Result<Self> {
        let url = Url::parse(value).map_err(|e| ReaderError::InvalidUrl(e.to_string()))?;
        Ok(self.base_url(url))
    }

    /// Builds the config.
    pub fn build(self) -> ReaderConfig {
        self.config
    }
}

impl Default for ReaderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one extraction pass over a document.
///
/// # Example
///
/// ```rust
/// use cleanreader_core::{Document, Reader};
///
/// let reader = Reader::new();
/// let doc = Document::parse("<html><body><article><p>Content here</p></article></body></html>").unwrap();
/// let article = reader.extract(&doc);
/// assert_eq!(article.content, "<p>Content here</p>");
/// ```
pub struct Reader {
    config: ReaderConfig,
    styles: Box<dyn StyleResolver>,
}

impl Reader {
    /// Creates a new Reader with default settings.
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    /// Creates a new Reader with a custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config, styles: Box::new(InlineStyleResolver) }
    }

    /// Replaces the computed-style source.
    pub fn with_style_resolver(mut self, styles: Box<dyn StyleResolver>) -> Self {
        self.styles = styles;
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Locates, sanitizes and measures the main content of `doc`.
    ///
    /// Never fails: every stage degrades to a safe default.
    pub fn extract(&self, doc: &Document) -> Article {
        let located = locate_main_content(doc, &self.config.content_selectors);
        let base_url = self.config.base_url.as_ref().or(doc.base_url());

        let sanitized = Sanitizer::new(self.styles.as_ref())
            .with_base_url(base_url)
            .sanitize(&located.element);

        let text_content = sanitized.text_content();
        let metrics = ReadingMetrics::from_text(&text_content, self.config.chars_per_minute);
        debug!(
            strategy = ?located.strategy,
            headings = sanitized.headings.len(),
            chars = metrics.char_count,
            minutes = metrics.reading_time_minutes,
            "extraction pass complete"
        );

        Article {
            content: sanitized.inner_html(),
            text_content,
            headings: sanitized.headings,
            metrics,
            metadata: doc.extract_metadata(),
            located_by: located.strategy,
            source_url: doc.base_url().map(|u| u.to_string()),
        }
    }

    /// Parses HTML and extracts its readable content.
    pub fn parse(&self, html: &str) -> Result<Article> {
        let doc = Document::parse(html)?;
        Ok(self.extract(&doc))
    }

    /// Parses HTML with a known source URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidUrl`] if the URL is invalid.
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Article> {
        let doc = Document::parse_with_url(html, url)?;
        Ok(self.extract(&doc))
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for one-liner extraction with defaults.
pub fn extract(html: &str) -> Result<Article> {
    Reader::new().parse(html)
}

/// Convenience function for one-liner extraction with URL context.
pub fn extract_with_url(html: &str, url: &str) -> Result<Article> {
    Reader::new().parse_with_url(html, url)
}
