//! Reader view composition.
//!
//! The view replaces the page body while reader mode is on: a sidebar with
//! the page title, reading stats and the TOC, a toolbar with the close and
//! settings controls, and the sanitized content pane.

use crate::article::Article;
use crate::clean::{escape_attr, escape_text};

/// Id of the element wrapping the whole reader view.
pub const CONTAINER_ID: &str = "clean-reader-container";

/// Id of the toolbar button that leaves reader mode.
pub const CLOSE_BUTTON_ID: &str = "clean-reader-close";

/// Id of the toolbar button that opens reader settings.
pub const SETTINGS_BUTTON_ID: &str = "clean-reader-settings";

/// A composed reader view over one article.
#[derive(Debug, Clone, Copy)]
pub struct ReaderView<'a> {
    article: &'a Article,
    indent_unit: u32,
}

impl<'a> ReaderView<'a> {
    pub fn new(article: &'a Article, indent_unit: u32) -> Self {
        Self { article, indent_unit }
    }

    /// Title shown in the sidebar: page metadata first, then the first
    /// non-empty heading.
    pub fn title(&self) -> Option<&'a str> {
        self.article.metadata.title.as_deref().or_else(|| {
            self.article
                .headings
                .iter()
                .map(|heading| heading.text.as_str())
                .find(|text| !text.is_empty())
        })
    }

    /// Renders the view markup. `active` marks the TOC entry in view.
    pub fn render(&self, active: Option<&str>) -> String {
        let mut html = format!("<div id=\"{}\" class=\"clean-reader\">", CONTAINER_ID);
        self.write_sidebar(&mut html, active);

        html.push_str("<main class=\"reader-main\">");
        html.push_str("<div class=\"reader-toolbar\">");
        html.push_str(&format!(
            "<button id=\"{}\" type=\"button\" title=\"Settings\">Settings</button>",
            SETTINGS_BUTTON_ID
        ));
        html.push_str(&format!(
            "<button id=\"{}\" type=\"button\" title=\"Exit reader mode\">Close</button>",
            CLOSE_BUTTON_ID
        ));
        html.push_str("</div>");
        html.push_str(&self.article.to_html());
        html.push_str("</main></div>");
        html
    }

    fn write_sidebar(&self, html: &mut String, active: Option<&str>) {
        html.push_str("<aside class=\"reader-sidebar\">");

        if let Some(title) = self.title() {
            html.push_str(&format!("<h2 class=\"reader-title\" title=\"{}\">{}</h2>", escape_attr(title), escape_text(title)));
        }

        let metrics = &self.article.metrics;
        html.push_str(&format!(
            "<div class=\"reader-stats\"><span class=\"word-count\">{} words</span><span class=\"reading-time\">{} min read</span></div>",
            metrics.word_count, metrics.reading_time_minutes
        ));

        let toc = self.article.toc(self.indent_unit);
        if !toc.is_empty() {
            html.push_str("<nav class=\"reader-toc\"><h3>Contents</h3>");
            html.push_str(&toc.to_html(active));
            html.push_str("</nav>");
        }

        html.push_str("</aside>");
    }
}
