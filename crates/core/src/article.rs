//! Article output type with sanitized content, headings, and format conversion.
//!
//! An [`Article`] is the complete result of one extraction pass: the clean
//! markup, its plain text, the headings recorded along the way, reading
//! metrics, page metadata, and how the content root was found.

use serde::Serialize;

use crate::Result;
use crate::formatters::json::{JsonConfig, convert_to_json};
use crate::formatters::markdown::{MarkdownConfig, convert_to_markdown};
use crate::formatters::text::{TextConfig, convert_to_text};
use crate::locate::LocateStrategy;
use crate::metadata::Metadata;
use crate::metrics::ReadingMetrics;
use crate::toc::{HeadingRecord, TableOfContents};

/// Output format options for Article content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Clean HTML, as placed in the reader view's content pane.
    Html,
    /// Markdown.
    Markdown,
    /// Plain text with paragraph breaks.
    PlainText,
    /// JSON (structured data).
    Json,
}

/// The complete result of reading an HTML document.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Sanitized content as clean HTML, without the root container.
    pub content: String,

    /// Concatenated text of the sanitized tree.
    pub text_content: String,

    /// Headings in document order, with their anchor ids.
    pub headings: Vec<HeadingRecord>,

    pub metrics: ReadingMetrics,

    /// Page metadata (title, author, site, language).
    pub metadata: Metadata,

    /// How the content root was found.
    pub located_by: LocateStrategy,

    /// Source URL if known.
    pub source_url: Option<String>,
}

impl Article {
    /// Builds the table of contents for this article's headings.
    pub fn toc(&self, indent_unit: u32) -> TableOfContents<'_> {
        TableOfContents::generate(&self.headings, indent_unit)
    }

    /// Content wrapped in the reader root container.
    pub fn to_html(&self) -> String {
        format!("<div class=\"reader-article\">{}</div>", self.content)
    }

    /// Converts content to the specified format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Html => Ok(self.content.clone()),
            OutputFormat::Markdown => self.to_markdown(),
            OutputFormat::PlainText => self.to_text(),
            OutputFormat::Json => self.to_json().map(|v| v.to_string()),
        }
    }

    /// Gets content as Markdown with default options.
    pub fn to_markdown(&self) -> Result<String> {
        convert_to_markdown(self, &MarkdownConfig::default())
    }

    /// Gets content as Markdown with custom configuration.
    pub fn to_markdown_with_config(&self, config: &MarkdownConfig) -> Result<String> {
        convert_to_markdown(self, config)
    }

    /// Gets the full article as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Gets a JSON document shaped by `config`.
    pub fn to_json_with_config(&self, config: &JsonConfig) -> Result<String> {
        convert_to_json(self, config)
    }

    /// Gets content as plain text with paragraph breaks.
    pub fn to_text(&self) -> Result<String> {
        convert_to_text(self, &TextConfig { preserve_paragraphs: true, ..Default::default() })
    }

    /// Gets content as plain text with custom configuration.
    pub fn to_text_with_config(&self, config: &TextConfig) -> Result<String> {
        convert_to_text(self, config)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_article() -> Article {
        let content = concat!(
            "<h1 id=\"heading-0\">Title</h1>",
            "<p>First paragraph with a <a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">link</a>.</p>",
            "<h2 id=\"heading-1\">Part</h2>",
            "<p>Second paragraph.</p>",
        )
        .to_string();
        let text_content = "TitleFirst paragraph with a link.PartSecond paragraph.".to_string();
        let metrics = ReadingMetrics::from_text(&text_content, 400);

        Article {
            content,
            text_content,
            headings: vec![
                HeadingRecord { level: 1, text: "Title".to_string(), id: "heading-0".to_string() },
                HeadingRecord { level: 2, text: "Part".to_string(), id: "heading-1".to_string() },
            ],
            metrics,
            metadata: Metadata {
                title: Some("Sample".to_string()),
                author: Some("Author".to_string()),
                ..Default::default()
            },
            located_by: LocateStrategy::Selector("article".to_string()),
            source_url: Some("https://example.com/sample".to_string()),
        }
    }

    #[test]
    fn test_toc_from_article() {
        let article = sample_article();
        let toc = article.toc(20);
        assert_eq!(toc.len(), 2);
        assert_eq!(toc.entries()[1].indent, 20);
        assert_eq!(toc.entries()[1].target(), "heading-1");
    }

    #[test]
    fn test_to_html_wraps_in_root() {
        let article = sample_article();
        let html = article.to_html();
        assert!(html.starts_with("<div class=\"reader-article\"><h1"));
        assert!(html.ends_with("</p></div>"));
    }

    #[test]
    fn test_to_format_html() {
        let article = sample_article();
        assert_eq!(article.to_format(OutputFormat::Html).unwrap(), article.content);
    }

    #[test]
    fn test_to_format_plain_text() {
        let article = sample_article();
        let text = article.to_format(OutputFormat::PlainText).unwrap();
        assert!(text.starts_with("Title\n\nFirst paragraph with a link."));
        assert!(text.ends_with("Second paragraph."));
    }

    #[test]
    fn test_to_format_markdown() {
        let article = sample_article();
        let markdown = article.to_format(OutputFormat::Markdown).unwrap();
        assert!(markdown.contains("# Title"));
        assert!(markdown.contains("[link](https://example.com)"));
    }

    #[test]
    fn test_article_serialization() {
        let article = sample_article();
        let json = article.to_json().unwrap();

        assert_eq!(json["metadata"]["title"], "Sample");
        assert_eq!(json["headings"][0]["id"], "heading-0");
        assert_eq!(json["metrics"]["reading_time_minutes"], 1);
        assert_eq!(json["located_by"]["kind"], "selector");
        assert_eq!(json["source_url"], "https://example.com/sample");
    }

    #[test]
    fn test_to_format_json() {
        let article = sample_article();
        let json = article.to_format(OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"content\""));
    }
}
