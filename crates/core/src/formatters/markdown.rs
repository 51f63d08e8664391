use crate::article::Article;
use crate::{ReaderError, Result};

/// Configuration for Markdown conversion
#[derive(Debug, Clone)]
pub struct MarkdownConfig {
    /// Include TOML frontmatter with metadata and reading metrics
    pub include_frontmatter: bool,
    /// Prepend a table of contents built from the article's headings
    pub include_toc: bool,
    /// Indentation unit used to derive TOC nesting
    pub toc_indent_unit: u32,
    /// Strip images from output
    pub strip_images: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { include_frontmatter: false, include_toc: false, toc_indent_unit: 20, strip_images: false }
    }
}

/// Convert an article's clean content to Markdown
pub fn convert_to_markdown(article: &Article, config: &MarkdownConfig) -> Result<String> {
    let mut output = String::new();

    if config.include_frontmatter {
        output.push_str(&generate_frontmatter(article));
        output.push('\n');
    }

    if config.include_toc && !article.headings.is_empty() {
        output.push_str(&article.toc(config.toc_indent_unit).to_markdown(config.toc_indent_unit));
        output.push('\n');
    }

    let processed_html = if config.strip_images { strip_images(&article.content)? } else { article.content.clone() };
    output.push_str(&html_to_markdown(&processed_html));

    Ok(output)
}

/// Generate TOML frontmatter from metadata and metrics
fn generate_frontmatter(article: &Article) -> String {
    let metadata = &article.metadata;
    let mut frontmatter = String::from("+++");

    if let Some(title) = &metadata.title {
        frontmatter.push_str(&format!("\ntitle = {}", toml_escape_string(title)));
    }

    if let Some(author) = &metadata.author {
        frontmatter.push_str(&format!("\nauthor = {}", toml_escape_string(author)));
    }

    if let Some(site) = &metadata.site_name {
        frontmatter.push_str(&format!("\nsite = {}", toml_escape_string(site)));
    }

    if let Some(language) = &metadata.language {
        frontmatter.push_str(&format!("\nlanguage = {}", toml_escape_string(language)));
    }

    if let Some(url) = &article.source_url {
        frontmatter.push_str(&format!("\nsource_url = {}", toml_escape_string(url)));
    }

    frontmatter.push_str(&format!("\nword_count = {}", article.metrics.word_count));
    frontmatter.push_str(&format!("\nreading_time_minutes = {}", article.metrics.reading_time_minutes));
    frontmatter.push_str("\n+++\n");

    frontmatter
}

/// Escape a string for TOML format
fn toml_escape_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n"))
}

/// Convert HTML to Markdown using htmd crate
#[cfg(feature = "markdown")]
fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_default()
}

/// Fallback HTML to text conversion when markdown feature is disabled
#[cfg(not(feature = "markdown"))]
fn html_to_markdown(html: &str) -> String {
    let doc = scraper::Html::parse_fragment(html);
    doc.root_element().text().collect::<String>()
}

/// Strip all img tags from HTML
fn strip_images(html: &str) -> Result<String> {
    let mut output = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("img", |el| {
                el.remove();
                Ok(())
            })],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() {
        return Ok(html.to_string());
    }

    String::from_utf8(output).map_err(|e| ReaderError::Serialization(e.to_string()))
}

/// Markdown formatter with configurable options
pub struct MarkdownFormatter {
    config: MarkdownConfig,
}

impl MarkdownFormatter {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, article: &Article) -> Result<String> {
        convert_to_markdown(article, &self.config)
    }
}
