//! Reader-mode state machine.
//!
//! One [`ReaderController`] owns one page for its whole lifetime. Turning
//! reader mode on captures a snapshot of the body, runs the reader pipeline
//! and swaps in the composed view; turning it off puts the snapshot back
//! verbatim. The enabled flag and the snapshot always move together.
//!
//! # Example
//!
//! ```rust
//! use cleanreader_core::{Page, ReaderController};
//!
//! let page = Page::from_html("<body><article><h1>Hi</h1><p>Hello world</p></article></body>").unwrap();
//! let original = page.body_html().to_string();
//!
//! let mut controller = ReaderController::new(page);
//! controller.toggle();
//! assert!(controller.is_enabled());
//! controller.toggle();
//! assert_eq!(controller.page().body_html(), original);
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::article::Article;
use crate::host::{Notifier, NullNotifier, OutboundMessage, PageEvent};
use crate::page::{DocumentSnapshot, Page};
use crate::reader::Reader;
use crate::toc::{IntersectionEntry, ScrollBehavior, ScrollCommand, ScrollSubscription};
use crate::view::ReaderView;

/// Whether reader mode is on for a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReaderState {
    pub enabled: bool,
}

/// What stays alive only while the reader view is shown.
#[derive(Debug)]
struct ReadingSession {
    article: Article,
    subscription: ScrollSubscription,
}

/// Drives one page between its normal and reader renderings.
pub struct ReaderController<N: Notifier = NullNotifier> {
    page: Page,
    reader: Reader,
    state: ReaderState,
    snapshot: Option<DocumentSnapshot>,
    session: Option<ReadingSession>,
    notifier: N,
}

impl ReaderController<NullNotifier> {
    /// Creates a controller with default reader settings and no host.
    pub fn new(page: Page) -> Self {
        Self::with_notifier(page, NullNotifier)
    }
}

impl<N: Notifier> ReaderController<N> {
    /// Creates a controller that reports state changes to `notifier`.
    pub fn with_notifier(page: Page, notifier: N) -> Self {
        Self { page, reader: Reader::new(), state: ReaderState::default(), snapshot: None, session: None, notifier }
    }

    /// Replaces the reader pipeline used on the next enable.
    pub fn with_reader(mut self, reader: Reader) -> Self {
        self.reader = reader;
        self
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Consumes the controller, returning the page as it currently stands.
    pub fn into_page(self) -> Page {
        self.page
    }

    /// The article shown while reader mode is on.
    pub fn article(&self) -> Option<&Article> {
        self.session.as_ref().map(|session| &session.article)
    }

    /// Anchor id of the heading currently in view.
    pub fn active_heading(&self) -> Option<&str> {
        self.session.as_ref().and_then(|session| session.subscription.active())
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Flips reader mode and returns the new enabled state.
    pub fn toggle(&mut self) -> bool {
        if self.state.enabled {
            self.disable();
        } else {
            self.enable();
        }
        self.state.enabled
    }

    /// Turns reader mode on. Returns `false` if it was already on.
    pub fn enable(&mut self) -> bool {
        if self.state.enabled {
            debug!("reader mode already enabled");
            return false;
        }

        self.snapshot = Some(self.page.snapshot());

        let document = self.page.document();
        let article = self.reader.extract(&document);
        let config = self.reader.config();
        let view = ReaderView::new(&article, config.toc_indent_unit).render(None);
        let subscription = ScrollSubscription::new(&article.headings, config.active_heading_threshold);

        info!(
            headings = article.headings.len(),
            reading_time = article.metrics.reading_time_minutes,
            strategy = ?article.located_by,
            "reader mode enabled"
        );

        self.page.set_body_html(view);
        self.session = Some(ReadingSession { article, subscription });
        self.state.enabled = true;
        self.notifier.notify(OutboundMessage::UpdateIcon { enabled: true });
        true
    }

    /// Turns reader mode off. Returns `false` if it was already off.
    ///
    /// Without a captured snapshot the body is left as is, but the state
    /// still transitions.
    pub fn disable(&mut self) -> bool {
        if !self.state.enabled {
            debug!("reader mode already disabled");
            return false;
        }

        if let Some(mut session) = self.session.take() {
            session.subscription.cancel();
        }

        match self.snapshot.take() {
            Some(snapshot) => self.page.restore(snapshot),
            None => debug!("no snapshot to restore"),
        }

        self.state.enabled = false;
        info!("reader mode disabled");
        self.notifier.notify(OutboundMessage::UpdateIcon { enabled: false });
        true
    }

    /// The reader view's close button. Same path as toggling off.
    pub fn on_close_clicked(&mut self) -> bool {
        self.disable()
    }

    /// A TOC entry click. Returns the scroll to perform, if `id` names a
    /// heading of the article currently shown.
    pub fn on_toc_click(&self, id: &str) -> Option<ScrollCommand> {
        let session = self.session.as_ref()?;
        session
            .article
            .headings
            .iter()
            .any(|heading| heading.id == id)
            .then(|| ScrollCommand { target: id.to_string(), behavior: ScrollBehavior::Smooth })
    }

    /// One scroll-observer batch. When the active heading changes, the view
    /// is re-rendered with the new entry highlighted and its id returned.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) -> Option<String> {
        let session = self.session.as_mut()?;
        let active = session.subscription.observe(entries)?.to_string();

        let view = ReaderView::new(&session.article, self.reader.config().toc_indent_unit).render(Some(&active));
        self.page.set_body_html(view);
        debug!(active = %active, "active heading changed");
        Some(active)
    }

    /// Single entry point for every event source.
    pub fn dispatch(&mut self, event: PageEvent) -> Option<ScrollCommand> {
        match event {
            PageEvent::Toggle => {
                self.toggle();
                None
            }
            PageEvent::CloseClicked => {
                self.on_close_clicked();
                None
            }
            PageEvent::TocClicked(id) => self.on_toc_click(&id),
            PageEvent::Intersection(entries) => {
                self.on_intersection(&entries);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{CLOSE_BUTTON_ID, CONTAINER_ID};

    const PAGE: &str = r#"<!DOCTYPE html>
        <html lang="en"><head><title>Doc</title></head>
        <body>
            <nav class="menu">X</nav>
            <article><h1>Title</h1><p>Hello world</p><h2>More</h2><p>Later text</p></article>
        </body></html>"#;

    fn controller() -> ReaderController<Vec<OutboundMessage>> {
        ReaderController::with_notifier(Page::from_html(PAGE).unwrap(), Vec::new())
    }

    #[test]
    fn test_enable_swaps_in_view() {
        let mut controller = controller();
        assert!(controller.enable());

        let body = controller.page().body_html();
        assert!(body.starts_with(&format!("<div id=\"{}\"", CONTAINER_ID)));
        assert!(body.contains(CLOSE_BUTTON_ID));
        assert!(body.contains("<h1 id=\"heading-0\">Title</h1>"));
        assert!(!body.contains(">X<"));
        assert_eq!(controller.notifier(), &vec![OutboundMessage::UpdateIcon { enabled: true }]);
    }

    #[test]
    fn test_double_toggle_restores_verbatim() {
        let mut controller = controller();
        let original = controller.page().body_html().to_string();

        assert!(controller.toggle());
        assert!(!controller.toggle());

        assert_eq!(controller.page().body_html(), original);
        assert!(controller.article().is_none());
        assert_eq!(
            controller.notifier(),
            &vec![OutboundMessage::UpdateIcon { enabled: true }, OutboundMessage::UpdateIcon { enabled: false }]
        );
    }

    #[test]
    fn test_enable_twice_is_noop() {
        let mut controller = controller();
        assert!(controller.enable());
        let view = controller.page().body_html().to_string();

        assert!(!controller.enable());
        assert_eq!(controller.page().body_html(), view);
        assert_eq!(controller.notifier().len(), 1);
    }

    #[test]
    fn test_disable_when_normal_is_noop() {
        let mut controller = controller();
        let original = controller.page().body_html().to_string();
        assert!(!controller.disable());
        assert_eq!(controller.page().body_html(), original);
        assert!(controller.notifier().is_empty());
    }

    #[test]
    fn test_close_button_restores() {
        let mut controller = controller();
        let original = controller.page().body_html().to_string();
        controller.enable();

        assert!(controller.on_close_clicked());
        assert!(!controller.is_enabled());
        assert_eq!(controller.page().body_html(), original);
    }

    #[test]
    fn test_toc_click_scrolls_smoothly() {
        let mut controller = controller();
        assert_eq!(controller.on_toc_click("heading-0"), None);

        controller.enable();
        assert_eq!(
            controller.dispatch(PageEvent::TocClicked("heading-1".to_string())),
            Some(ScrollCommand { target: "heading-1".to_string(), behavior: ScrollBehavior::Smooth })
        );
        assert_eq!(controller.on_toc_click("heading-9"), None);
    }

    #[test]
    fn test_intersection_marks_active_entry() {
        let mut controller = controller();
        controller.enable();

        let changed = controller.on_intersection(&[IntersectionEntry::new("heading-1", 0.75)]);
        assert_eq!(changed.as_deref(), Some("heading-1"));
        assert_eq!(controller.active_heading(), Some("heading-1"));
        assert!(controller.page().body_html().contains("toc-item active toc-level-2"));

        assert_eq!(controller.on_intersection(&[IntersectionEntry::new("heading-0", 0.2)]), None);
        assert_eq!(controller.active_heading(), Some("heading-1"));
    }

    #[test]
    fn test_intersection_ignored_after_disable() {
        let mut controller = controller();
        controller.enable();
        controller.disable();
        let original = controller.page().body_html().to_string();

        assert_eq!(controller.on_intersection(&[IntersectionEntry::new("heading-0", 1.0)]), None);
        assert_eq!(controller.page().body_html(), original);
        assert_eq!(controller.active_heading(), None);
    }

    #[test]
    fn test_dispatch_toggle_and_close() {
        let mut controller = controller();
        assert_eq!(controller.dispatch(PageEvent::Toggle), None);
        assert!(controller.is_enabled());
        assert_eq!(controller.dispatch(PageEvent::CloseClicked), None);
        assert!(!controller.is_enabled());
        assert_eq!(controller.state(), ReaderState { enabled: false });
    }
}
