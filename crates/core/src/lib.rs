pub mod article;
pub mod clean;
pub mod controller;
pub mod error;
pub mod formatters;
pub mod host;
pub mod locate;
pub mod metadata;
pub mod metrics;
pub mod page;
pub mod parse;
pub mod reader;
pub mod sanitize;
pub mod style;
pub mod toc;
pub mod view;

pub use article::{Article, OutputFormat};
pub use clean::{CleanElement, CleanNode, CleanTag};
pub use controller::{ReaderController, ReaderState};
pub use error::{ReaderError, Result};
pub use formatters::{JsonConfig, JsonFormatter, MarkdownConfig, MarkdownFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_json, convert_to_markdown, convert_to_text, metadata_to_json};
#[cfg(feature = "host")]
pub use host::run_bridge;
pub use host::{InboundMessage, Notifier, NullNotifier, OutboundMessage, PageEvent};
pub use locate::{DEFAULT_CONTENT_SELECTORS, LocateStrategy, LocatedContent, locate_main_content};
pub use metadata::Metadata;
pub use metrics::{DEFAULT_CHARS_PER_MINUTE, ReadingMetrics, count_words};
pub use page::{DocumentSnapshot, Page, read_file, read_stdin};
pub use parse::{Document, Element};
pub use reader::{Reader, ReaderConfig, ReaderConfigBuilder, extract, extract_with_url};
pub use sanitize::{SanitizedContent, Sanitizer, is_skipped};
pub use style::{InlineStyleResolver, StyleProperty, StyleResolver};
pub use toc::{
    HeadingCollector, HeadingRecord, IntersectionEntry, ScrollBehavior, ScrollCommand, ScrollSubscription,
    TableOfContents, TocEntry,
};
pub use view::ReaderView;
