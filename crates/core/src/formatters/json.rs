use serde::Serialize;

use crate::Result;
use crate::article::Article;
use crate::formatters::markdown::{MarkdownConfig, convert_to_markdown};
use crate::formatters::text::{TextConfig, convert_to_text};
use crate::locate::LocateStrategy;
use crate::metadata::Metadata;
use crate::metrics::ReadingMetrics;
use crate::toc::{HeadingRecord, TocEntry};

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    pub metadata: &'a Metadata,
    pub metrics: ReadingMetrics,
    pub located_by: &'a LocateStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<&'a str>,
    pub headings: &'a [HeadingRecord],
    /// Indented TOC rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<Vec<TocEntry<'a>>>,
    pub content: ContentFormats,
}

/// Content in multiple formats
#[derive(Debug, Clone, Serialize)]
pub struct ContentFormats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    pub include_markdown: bool,
    pub include_text: bool,
    pub include_html: bool,
    /// Include TOC rows with their indentation
    pub include_toc: bool,
    pub toc_indent_unit: u32,
    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            include_markdown: false,
            include_text: true,
            include_html: true,
            include_toc: true,
            toc_indent_unit: 20,
            pretty: false,
        }
    }
}

/// Convert an article to JSON
pub fn convert_to_json(article: &Article, config: &JsonConfig) -> Result<String> {
    let markdown = if config.include_markdown {
        Some(convert_to_markdown(article, &MarkdownConfig { toc_indent_unit: config.toc_indent_unit, ..Default::default() })?)
    } else {
        None
    };
    let text = if config.include_text {
        Some(convert_to_text(article, &TextConfig { preserve_paragraphs: true, ..Default::default() })?)
    } else {
        None
    };

    let content = ContentFormats { markdown, text, html: config.include_html.then(|| article.content.clone()) };
    let toc = config
        .include_toc
        .then(|| article.toc(config.toc_indent_unit).entries().to_vec());

    let output = JsonOutput {
        metadata: &article.metadata,
        metrics: article.metrics,
        located_by: &article.located_by,
        source_url: article.source_url.as_deref(),
        headings: &article.headings,
        toc,
        content,
    };

    to_string(&output, config.pretty)
}

/// Convert metadata to JSON
pub fn metadata_to_json(metadata: &Metadata, pretty: bool) -> Result<String> {
    to_string(metadata, pretty)
}

fn to_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    Ok(json)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, article: &Article) -> Result<String> {
        convert_to_json(article, &self.config)
    }

    pub fn metadata_only(&self, metadata: &Metadata) -> Result<String> {
        metadata_to_json(metadata, self.config.pretty)
    }
}
