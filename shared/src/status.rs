use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::trace;

use crate::model::Movie;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    Timeout,
    NetworkError,
}

impl FailureReason {
    /// Stable code the shell maps onto its own localized message.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Timeout => "TIMEOUT",
            Self::NetworkError => "NETWORK_ERROR",
        }
    }
}

/// Point-in-time notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatusEvent {
    LoadingChanged(bool),
    Failed(FailureReason),
    Loaded(Vec<Movie>),
    Empty,
    ItemAdded(Movie),
    DuplicateFavourite,
}

pub type StatusReceiver = mpsc::UnboundedReceiver<StatusEvent>;

#[derive(Clone, Debug)]
pub struct StatusSender {
    tx: mpsc::UnboundedSender<StatusEvent>,
}

impl StatusSender {
    /// Never blocks and never fails the caller. Events sent after the
    /// receiver is gone are dropped.
    pub fn emit(&self, event: StatusEvent) {
        if let Err(mpsc::error::SendError(event)) = self.tx.send(event) {
            trace!(?event, "status receiver dropped, discarding event");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub fn status_channel() -> (StatusSender, StatusReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (StatusSender { tx }, rx)
}

/// Emits `LoadingChanged(true)` on creation and `LoadingChanged(false)` when
/// dropped, so the second event fires on every exit path including
/// cancellation of the owning future.
pub(crate) struct LoadingGuard<'a> {
    events: &'a StatusSender,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn start(events: &'a StatusSender) -> Self {
        events.emit(StatusEvent::LoadingChanged(true));
        Self { events }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.events.emit(StatusEvent::LoadingChanged(false));
    }
}
