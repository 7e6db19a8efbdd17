//! Notifications from list controllers to whatever renders them

use tokio::sync::mpsc;

use super::controller::{ListMode, PageSummary};
use crate::entities::EntityKind;

/// Emitted after a list changes or a background load fails
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// Items were replaced by a first page or a search result
    Replaced {
        kind: EntityKind,
        mode: ListMode,
        summary: PageSummary,
    },
    /// A further page was appended
    Appended {
        kind: EntityKind,
        summary: PageSummary,
    },
    /// A debounced search or clear failed; the list kept its last-good state
    Failed {
        kind: EntityKind,
        status: Option<u16>,
        message: String,
    },
    /// The backend rejected the session; the UI should route to login
    SessionExpired { kind: EntityKind, message: String },
}

pub type ListEventSender = mpsc::UnboundedSender<ListEvent>;
pub type ListEventReceiver = mpsc::UnboundedReceiver<ListEvent>;

pub fn list_event_channel() -> (ListEventSender, ListEventReceiver) {
    mpsc::unbounded_channel()
}
