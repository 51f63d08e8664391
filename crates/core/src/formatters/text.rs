use scraper::{ElementRef, Html, Node};

use crate::Result;
use crate::article::Article;

/// Clean-subset tags that start and end a paragraph of text
const BLOCK_ELEMENTS: [&str; 11] = ["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "pre", "ul"];

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Separate block elements with blank lines
    pub preserve_paragraphs: bool,

    /// Wrap lines at specified width (0 = no wrapping)
    pub line_width: usize,

    /// Include a title and reading-time header
    pub include_header: bool,
}

/// Plain text formatter
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, article: &Article) -> Result<String> {
        convert_to_text(article, &self.config)
    }
}

/// Convert an article to plain text with specified configuration
pub fn convert_to_text(article: &Article, config: &TextConfig) -> Result<String> {
    let mut output = String::new();

    if config.include_header {
        output.push_str(&generate_header(article));
        output.push('\n');
    }

    let text =
        if config.preserve_paragraphs { paragraphs(&article.content).join("\n\n") } else { article.text_content.clone() };

    let final_text = if config.line_width > 0 { wrap_text(&text, config.line_width) } else { text };
    output.push_str(&final_text);

    Ok(output.trim().to_string())
}

/// Title underline plus byline and reading stats
fn generate_header(article: &Article) -> String {
    let mut header = String::new();

    if let Some(title) = &article.metadata.title {
        header.push_str(title);
        header.push('\n');
        header.push_str(&"=".repeat(title.chars().count()));
        header.push('\n');
    }

    let mut meta_parts = Vec::new();

    if let Some(author) = &article.metadata.author {
        meta_parts.push(format!("By: {}", author));
    }

    if let Some(site) = &article.metadata.site_name {
        meta_parts.push(format!("Site: {}", site));
    }

    meta_parts.push(format!("{} words", article.metrics.word_count));
    meta_parts.push(format!("{} min read", article.metrics.reading_time_minutes));

    header.push_str(&meta_parts.join(" | "));
    header.push('\n');
    header
}

/// Splits clean markup into paragraphs at block boundaries.
///
/// Whitespace inside a paragraph is collapsed. Nested blocks end the
/// enclosing paragraph instead of repeating its text.
fn paragraphs(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let mut blocks = Vec::new();
    let mut current = String::new();
    collect_blocks(fragment.root_element(), &mut current, &mut blocks);
    flush(&mut current, &mut blocks);
    blocks
}

fn collect_blocks(element: ElementRef<'_>, current: &mut String, blocks: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => current.push_str(text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let is_block = BLOCK_ELEMENTS.contains(&child.value().name());
                if is_block {
                    flush(current, blocks);
                }
                collect_blocks(child, current, blocks);
                if is_block {
                    flush(current, blocks);
                }
            }
            _ => {}
        }
    }
}

fn flush(current: &mut String, blocks: &mut Vec<String>) {
    let block = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !block.is_empty() {
        blocks.push(block);
    }
    current.clear();
}

/// Wrap each paragraph to specified line width
fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    text.split("\n\n")
        .map(|paragraph| {
            paragraph
                .lines()
                .map(|line| wrap_words(&line.split_whitespace().collect::<Vec<_>>(), width))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Wrap a slice of words to specified width
fn wrap_words(words: &[&str], width: usize) -> String {
    let mut lines = Vec::new();
    let mut current_line = Vec::new();
    let mut current_length = 0;

    for &word in words {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_length += 1 + word_len;
            current_line.push(word);
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }

    lines.join("\n")
}
