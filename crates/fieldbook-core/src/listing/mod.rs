//! Paged entity lists
//!
//! - `PagedListController`: cursor state, append vs. replace semantics,
//!   debounced search, stale-response protection
//! - `AutoLoadTrigger`: loads the next page when the list end is visible
//! - `PageSource`: the backend seam, implemented by `ApiClient`

pub mod autoload;
pub mod controller;
pub mod events;
pub mod filter;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use autoload::{AutoLoadTrigger, Bounds, Viewport};
pub use controller::{
    ListConfig, ListMode, LoadOutcome, PageSummary, PagedListController, SearchDispatch,
    SearchOptions, SkipReason,
};
pub use events::{list_event_channel, ListEvent, ListEventReceiver, ListEventSender};
pub use filter::{FilterSpec, StatusFilter};
pub use source::PageSource;
