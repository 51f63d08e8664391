//! Headings, the table of contents built from them, and scroll sync.
//!
//! Headings are collected during sanitization in document order. The TOC is
//! a flat list of borrowed views over those records, indented by level. A
//! [`ScrollSubscription`] tracks which heading is in view while the reader
//! view is open.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::clean::escape_attr;
use crate::clean::escape_text;

/// Prefix of every heading anchor id.
pub const ANCHOR_PREFIX: &str = "heading-";

/// A heading seen during one sanitization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingRecord {
    pub level: u8,
    pub text: String,
    pub id: String,
}

/// Assigns sequential anchors to headings as the sanitizer meets them.
#[derive(Debug, Default)]
pub struct HeadingCollector {
    records: Vec<HeadingRecord>,
}

impl HeadingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the next anchor for a heading before its children are visited.
    ///
    /// Returns the record's index and its anchor id. Levels outside 1..=6 are
    /// clamped. The text stays empty until [`HeadingCollector::set_text`].
    pub fn reserve(&mut self, level: u8) -> (usize, String) {
        let index = self.records.len();
        let id = format!("{}{}", ANCHOR_PREFIX, index);
        self.records.push(HeadingRecord { level: level.clamp(1, 6), text: String::new(), id: id.clone() });
        (index, id)
    }

    /// Fills in the text of a reserved heading, trimmed.
    pub fn set_text(&mut self, index: usize, text: &str) {
        if let Some(record) = self.records.get_mut(index) {
            record.text = text.trim().to_string();
        }
    }

    pub fn into_records(self) -> Vec<HeadingRecord> {
        self.records
    }
}

/// One row of the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TocEntry<'a> {
    #[serde(flatten)]
    pub heading: &'a HeadingRecord,
    /// Left indentation, `(level - 1) * unit`.
    pub indent: u32,
}

impl TocEntry<'_> {
    pub fn target(&self) -> &str {
        &self.heading.id
    }
}

/// A flat, indented list of headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOfContents<'a> {
    entries: Vec<TocEntry<'a>>,
}

impl<'a> TableOfContents<'a> {
    /// Builds one entry per heading, in order.
    pub fn generate(headings: &'a [HeadingRecord], indent_unit: u32) -> Self {
        let entries = headings
            .iter()
            .map(|heading| TocEntry { heading, indent: u32::from(heading.level.saturating_sub(1)) * indent_unit })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[TocEntry<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the list. `active` marks the entry of the heading in view.
    pub fn to_html(&self, active: Option<&str>) -> String {
        let mut html = String::from("<ul class=\"toc-list\">");
        for entry in &self.entries {
            let class = if active == Some(entry.target()) { "toc-item active" } else { "toc-item" };
            html.push_str(&format!(
                "<li class=\"{} toc-level-{}\" data-target=\"{}\" style=\"padding-left: {}px\"><a href=\"#{}\">{}</a></li>",
                class,
                entry.heading.level,
                escape_attr(entry.target()),
                entry.indent,
                escape_attr(entry.target()),
                escape_text(&entry.heading.text),
            ));
        }
        html.push_str("</ul>");
        html
    }

    /// Renders the list as nested-looking Markdown bullets.
    pub fn to_markdown(&self, indent_unit: u32) -> String {
        let unit = indent_unit.max(1);
        self.entries
            .iter()
            .map(|entry| {
                let depth = (entry.indent / unit) as usize;
                format!("{}- [{}](#{})\n", "  ".repeat(depth), entry.heading.text, entry.target())
            })
            .collect()
    }
}

/// How the host should animate a scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
    Auto,
}

/// Instruction to the host to bring a heading into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollCommand {
    pub target: String,
    pub behavior: ScrollBehavior,
}

/// One observation delivered by the host's intersection observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub target: String,
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: impl Into<String>, ratio: f64) -> Self {
        Self { target: target.into(), ratio }
    }
}

/// Observer-driven tracking of the heading currently in view.
///
/// Owned by the controller for as long as the reader view is open and
/// cancelled when it closes; a cancelled subscription ignores every callback.
#[derive(Debug)]
pub struct ScrollSubscription {
    threshold: f64,
    targets: HashSet<String>,
    active: Option<String>,
    cancelled: bool,
}

impl ScrollSubscription {
    pub fn new(headings: &[HeadingRecord], threshold: f64) -> Self {
        Self {
            threshold,
            targets: headings.iter().map(|h| h.id.clone()).collect(),
            active: None,
            cancelled: false,
        }
    }

    /// Applies one observer callback batch.
    ///
    /// Entries at or above the threshold make their heading active; the last
    /// qualifying entry of the batch wins. Returns the new active id when it
    /// changed.
    pub fn observe(&mut self, entries: &[IntersectionEntry]) -> Option<&str> {
        if self.cancelled {
            return None;
        }

        let mut changed = false;
        for entry in entries {
            if entry.ratio >= self.threshold
                && self.targets.contains(&entry.target)
                && self.active.as_deref() != Some(entry.target.as_str())
            {
                self.active = Some(entry.target.clone());
                changed = true;
            }
        }

        if changed { self.active.as_deref() } else { None }
    }

    pub fn active(&self) -> Option<&str> {
        if self.cancelled { None } else { self.active.as_deref() }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.active = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
