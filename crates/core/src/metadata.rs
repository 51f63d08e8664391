//! Page metadata for the reader sidebar and the exported formats.
//!
//! Each field is looked up through a short list of sources, most specific
//! first: JSON-LD, then `<meta>` tags, then plain markup.

use serde::Serialize;
use serde_json::Value;

use crate::Document;

/// Page-level metadata shown alongside the reader view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub site_name: Option<String>,
    pub language: Option<String>,
}

impl Document {
    /// Collects every metadata field.
    pub fn extract_metadata(&self) -> Metadata {
        let json_ld = self.json_ld();
        Metadata {
            title: self.title_from(json_ld.as_ref()),
            author: self.author_from(json_ld.as_ref()),
            site_name: self.site_name_from(json_ld.as_ref()),
            language: self.language(),
        }
    }

    /// Title: JSON-LD `headline`, `og:title`, `twitter:title`, meta `title`,
    /// `<title>`, then the first `<h1>`.
    pub fn extract_title(&self) -> Option<String> {
        self.title_from(self.json_ld().as_ref())
    }

    /// Author: JSON-LD `author`, meta `author`, then a `rel="author"` link.
    pub fn extract_author(&self) -> Option<String> {
        self.author_from(self.json_ld().as_ref())
    }

    /// Site name: JSON-LD `publisher.name`, `og:site_name`, then the domain
    /// of the page URL.
    pub fn extract_site_name(&self) -> Option<String> {
        self.site_name_from(self.json_ld().as_ref())
    }

    fn title_from(&self, json_ld: Option<&Value>) -> Option<String> {
        json_ld
            .and_then(|ld| ld.get("headline"))
            .and_then(Value::as_str)
            .and_then(non_empty)
            .or_else(|| self.meta_content(&["og:title", "twitter:title", "title"]))
            .or_else(|| self.title().as_deref().and_then(non_empty))
            .or_else(|| self.first_text("h1"))
    }

    fn author_from(&self, json_ld: Option<&Value>) -> Option<String> {
        json_ld
            .and_then(|ld| ld.get("author"))
            .and_then(author_name)
            .or_else(|| self.meta_content(&["author"]))
            .or_else(|| self.first_text("[rel=\"author\"]"))
    }

    fn site_name_from(&self, json_ld: Option<&Value>) -> Option<String> {
        json_ld
            .and_then(|ld| ld.pointer("/publisher/name"))
            .and_then(Value::as_str)
            .and_then(non_empty)
            .or_else(|| self.meta_content(&["og:site_name"]))
            .or_else(|| self.base_url().and_then(|url| url.domain()).map(str::to_string))
    }

    /// First non-empty `content` of a `<meta>` whose `name` or `property`
    /// matches one of `keys`, trying keys in order.
    fn meta_content(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            ["name", "property"].iter().find_map(|attr| {
                self.select(&format!("meta[{}=\"{}\"]", attr, key))
                    .ok()?
                    .first()?
                    .attr("content")
                    .and_then(non_empty)
            })
        })
    }

    fn first_text(&self, selector: &str) -> Option<String> {
        self.select(selector).ok()?.first().and_then(|el| non_empty(&el.text()))
    }

    /// First `application/ld+json` block that parses.
    fn json_ld(&self) -> Option<Value> {
        self.select("script[type=\"application/ld+json\"]")
            .ok()?
            .iter()
            .find_map(|el| serde_json::from_str(el.text().trim()).ok())
    }
}

/// JSON-LD `author` as a string, an object with `name`, or a list of either.
fn author_name(author: &Value) -> Option<String> {
    match author {
        Value::String(name) => non_empty(name),
        Value::Array(authors) => authors.first().and_then(author_name),
        _ => author.get("name").and_then(Value::as_str).and_then(non_empty),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}
