//! Host integration boundary.
//!
//! The host sends `toggleReader` and receives `updateIcon` notifications,
//! both as JSON objects tagged by `action`. Page-side UI callbacks arrive as
//! [`PageEvent`]s. With the `host` feature, [`run_bridge`] feeds a channel of
//! events into a controller one at a time.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::toc::{IntersectionEntry, ScrollCommand};
use crate::{ReaderError, Result};

/// Message from the host to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum InboundMessage {
    ToggleReader,
}

impl InboundMessage {
    /// Decodes a wire message.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidMessage`] for malformed JSON or an unknown action.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cleanreader_core::host::InboundMessage;
    ///
    /// let message = InboundMessage::from_json(r#"{"action":"toggleReader"}"#).unwrap();
    /// assert_eq!(message, InboundMessage::ToggleReader);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ReaderError::InvalidMessage(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Message from the page to the host. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Reader mode was switched on or off.
    UpdateIcon { enabled: bool },
    /// A TOC entry was clicked; bring its heading into view.
    ScrollIntoView(ScrollCommand),
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ReaderError::InvalidMessage(e.to_string()))
    }
}

/// Receiver of outbound notifications.
pub trait Notifier {
    fn notify(&mut self, message: OutboundMessage);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _message: OutboundMessage) {}
}

/// Records notifications in order.
impl Notifier for Vec<OutboundMessage> {
    fn notify(&mut self, message: OutboundMessage) {
        self.push(message);
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, message: OutboundMessage) {
        (**self).notify(message);
    }
}

impl Notifier for std::sync::mpsc::Sender<OutboundMessage> {
    fn notify(&mut self, message: OutboundMessage) {
        if self.send(message).is_err() {
            warn!("host channel closed; dropping notification");
        }
    }
}

#[cfg(feature = "host")]
impl Notifier for tokio::sync::mpsc::UnboundedSender<OutboundMessage> {
    fn notify(&mut self, message: OutboundMessage) {
        if self.send(message).is_err() {
            warn!("host channel closed; dropping notification");
        }
    }
}

/// Everything that can drive the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// External toggle signal from the host.
    Toggle,
    /// The reader view's close button.
    CloseClicked,
    /// A TOC entry was clicked; carries the heading anchor id.
    TocClicked(String),
    /// One intersection-observer callback batch.
    Intersection(Vec<IntersectionEntry>),
}

impl From<InboundMessage> for PageEvent {
    fn from(message: InboundMessage) -> Self {
        match message {
            InboundMessage::ToggleReader => PageEvent::Toggle,
        }
    }
}

/// Drains `events` into `controller` until every sender is dropped.
///
/// Events are handled strictly one after another, so two toggles queued back
/// to back can never both see reader mode off. Scroll commands are forwarded
/// to the controller's notifier. Returns the number of events handled.
#[cfg(feature = "host")]
pub async fn run_bridge<N, E>(
    controller: &mut crate::controller::ReaderController<N>, mut events: tokio::sync::mpsc::UnboundedReceiver<E>,
) -> usize
where
    N: Notifier,
    E: Into<PageEvent>,
{
    let mut handled = 0;
    while let Some(event) = events.recv().await {
        if let Some(command) = controller.dispatch(event.into()) {
            controller.notifier_mut().notify(OutboundMessage::ScrollIntoView(command));
        }
        handled += 1;
    }
    tracing::debug!(handled, "host bridge closed");
    handled
}
