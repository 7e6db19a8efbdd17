//! Paged list controller
//!
//! One controller per entity list. It owns the accumulated items and the
//! pagination cursor, and keeps two result streams apart:
//! - "load more" appends pages of the plain listing
//! - search replaces the items with a complete result set
//!
//! Every reload (first page, search, clear) bumps a generation number.
//! A response is only committed if its generation is still current, so a
//! slow stale response can never overwrite a newer one. Failed requests
//! leave the list in its last-good state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::events::{ListEvent, ListEventSender};
use super::filter::FilterSpec;
use super::source::PageSource;
use crate::constants::search;
use crate::entities::{Entity, EntityKind, Page};
use crate::error::Result;

/// Which query regime populated the items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Listing,
    Search,
}

/// Pagination state right after a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub page: u32,
    pub has_more: bool,
    pub total: u64,
    /// Items in the response, before status narrowing
    pub received: usize,
    /// Items held by the list after the commit
    pub len: usize,
}

/// Why a load was not attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoMorePages,
    SearchActive,
    /// A first page or search is pending; auto-load is disarmed until it lands
    Reloading,
    /// Another next-page request for this list has not resolved yet
    InFlight,
    TermTooShort,
    NotVisible,
    TriggerUnavailable,
}

/// Result of a load that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied(PageSummary),
    /// A newer reload was issued while this request was in flight; the response was dropped
    Superseded,
    Skipped(SkipReason),
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied(_))
    }

    pub fn summary(&self) -> Option<&PageSummary> {
        match self {
            LoadOutcome::Applied(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Live search tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub min_length: usize,
    pub debounce: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_length: search::MIN_LENGTH,
            debounce: search::DEBOUNCE,
        }
    }
}

/// What `search` did with a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDispatch {
    /// A request will fire after the debounce window unless superseded
    Scheduled,
    /// Term was empty; the plain listing is reloading now
    Cleared,
    /// Term shorter than the minimum; nothing was requested
    Ignored,
}

/// Per-list configuration
#[derive(Debug, Clone)]
pub struct ListConfig {
    pub page_size: u32,
    pub search: SearchOptions,
    pub events: Option<ListEventSender>,
}

impl ListConfig {
    pub fn for_kind(kind: EntityKind) -> Self {
        Self {
            page_size: kind.default_page_size(),
            search: SearchOptions::default(),
            events: None,
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn events(mut self, events: ListEventSender) -> Self {
        self.events = Some(events);
        self
    }
}

struct ListState<T> {
    items: Vec<T>,
    /// Last committed page under the current query; 0 before the first commit
    page: u32,
    has_more: bool,
    total: u64,
    mode: ListMode,
    query: Option<String>,
    filter: FilterSpec,
    generation: u64,
    reloading: bool,
    /// Generation of the next-page request in flight, if any
    next_in_flight: Option<u64>,
}

impl<T> ListState<T> {
    fn new(filter: FilterSpec, generation: u64) -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            has_more: false,
            total: 0,
            mode: ListMode::Listing,
            query: None,
            filter,
            generation,
            reloading: false,
            next_in_flight: None,
        }
    }

    fn begin_reload(&mut self) -> u64 {
        self.generation += 1;
        self.reloading = true;
        self.next_in_flight = None;
        self.generation
    }

    fn next_page_blocker(&self) -> Option<SkipReason> {
        if self.mode == ListMode::Search {
            Some(SkipReason::SearchActive)
        } else if self.reloading {
            Some(SkipReason::Reloading)
        } else if self.next_in_flight.is_some() {
            Some(SkipReason::InFlight)
        } else if !self.has_more {
            Some(SkipReason::NoMorePages)
        } else {
            None
        }
    }

    fn summary(&self, received: usize) -> PageSummary {
        PageSummary {
            page: self.page,
            has_more: self.has_more,
            total: self.total,
            received,
            len: self.items.len(),
        }
    }
}

struct Shared<T: Entity> {
    source: Arc<dyn PageSource<T>>,
    state: Mutex<ListState<T>>,
    page_size: u32,
    search: SearchOptions,
    /// Bumped on every keystroke; a debounced search fires only if its ticket is still current
    search_ticket: AtomicU64,
    events: Option<ListEventSender>,
}

/// Controller for one entity list, cheap to clone
pub struct PagedListController<T: Entity> {
    shared: Arc<Shared<T>>,
}

impl<T: Entity> Clone for PagedListController<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Entity> PagedListController<T> {
    pub fn new(source: Arc<dyn PageSource<T>>) -> Self {
        Self::with_config(source, ListConfig::for_kind(T::KIND))
    }

    pub fn with_config(source: Arc<dyn PageSource<T>>, config: ListConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                state: Mutex::new(ListState::new(FilterSpec::default(), 0)),
                page_size: config.page_size.max(1),
                search: config.search,
                search_ticket: AtomicU64::new(0),
                events: config.events,
            }),
        }
    }

    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    pub fn items(&self) -> Vec<T> {
        self.shared.state.lock().items.clone()
    }

    /// Borrow the items without cloning them
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.shared.state.lock().items)
    }

    pub fn len(&self) -> usize {
        self.shared.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn page(&self) -> u32 {
        self.shared.state.lock().page
    }

    pub fn has_more(&self) -> bool {
        self.shared.state.lock().has_more
    }

    pub fn total(&self) -> u64 {
        self.shared.state.lock().total
    }

    pub fn mode(&self) -> ListMode {
        self.shared.state.lock().mode
    }

    pub fn query(&self) -> Option<String> {
        self.shared.state.lock().query.clone()
    }

    /// Filter of the last committed listing
    pub fn filter(&self) -> FilterSpec {
        self.shared.state.lock().filter.clone()
    }

    pub fn is_loading(&self) -> bool {
        let state = self.shared.state.lock();
        state.reloading || state.next_in_flight.is_some()
    }

    /// True when an auto-load trigger may be shown for this list
    pub fn auto_load_armed(&self) -> bool {
        let state = self.shared.state.lock();
        state.mode == ListMode::Listing && state.has_more && !state.reloading
    }

    /// Load page 1 of the plain listing under `filter`, replacing the items on success
    pub async fn load_first_page(&self, filter: FilterSpec) -> Result<LoadOutcome> {
        let generation = self.shared.state.lock().begin_reload();
        info!("Loading {} page 1 (generation {})", T::KIND, generation);

        let result = self
            .shared
            .source
            .fetch_page(1, self.shared.page_size, &filter)
            .await;

        let mut state = self.shared.state.lock();
        if state.generation != generation {
            return Self::discard_stale(result, generation);
        }
        state.reloading = false;
        let page = result?;

        let received = page.items.len();
        state.items = filter.retain(page.items);
        state.page = page.page.max(1);
        state.has_more = page.has_more;
        state.total = page.total;
        state.mode = ListMode::Listing;
        state.query = None;
        state.filter = filter;
        let summary = state.summary(received);
        drop(state);

        debug!(
            "{} page 1 committed: {} items, has_more={}, total={}",
            T::KIND,
            summary.len,
            summary.has_more,
            summary.total
        );
        self.emit(ListEvent::Replaced {
            kind: T::KIND,
            mode: ListMode::Listing,
            summary,
        });
        Ok(LoadOutcome::Applied(summary))
    }

    /// Append the next page of the current listing
    ///
    /// Skipped (not an error) when there is nothing more to load, a search
    /// is showing, a reload is pending, or another next-page request is in
    /// flight.
    pub async fn load_next_page(&self) -> Result<LoadOutcome> {
        let (generation, next_page, filter) = {
            let mut state = self.shared.state.lock();
            if let Some(reason) = state.next_page_blocker() {
                debug!("{} next page skipped: {:?}", T::KIND, reason);
                return Ok(LoadOutcome::Skipped(reason));
            }
            state.next_in_flight = Some(state.generation);
            (state.generation, state.page + 1, state.filter.clone())
        };
        info!("Loading {} page {} (generation {})", T::KIND, next_page, generation);

        let result = self
            .shared
            .source
            .fetch_page(next_page, self.shared.page_size, &filter)
            .await;

        let mut state = self.shared.state.lock();
        if state.next_in_flight == Some(generation) {
            state.next_in_flight = None;
        }
        if state.generation != generation {
            return Self::discard_stale(result, generation);
        }
        let page = result?;

        let received = page.items.len();
        state.items.extend(filter.retain(page.items));
        state.page = page.page.max(1);
        state.has_more = page.has_more;
        state.total = page.total;
        let summary = state.summary(received);
        drop(state);

        self.emit(ListEvent::Appended {
            kind: T::KIND,
            summary,
        });
        Ok(LoadOutcome::Applied(summary))
    }

    /// Feed a search-box change using the list's configured options
    pub fn search(&self, term: &str) -> SearchDispatch {
        self.search_with(term, self.shared.search)
    }

    /// Feed a search-box change
    ///
    /// Cancels any pending debounced search. An empty term reloads the
    /// plain listing immediately; a term shorter than `min_length` is
    /// ignored; anything else fires after `debounce` of inactivity. Results
    /// and failures of the background request arrive as `ListEvent`s.
    /// Must be called from within a tokio runtime.
    pub fn search_with(&self, term: &str, options: SearchOptions) -> SearchDispatch {
        let term = term.trim().to_string();
        let ticket = self.shared.search_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        if term.is_empty() {
            let controller = self.clone();
            tokio::spawn(async move {
                let result = controller.reload().await;
                controller.report(result);
            });
            return SearchDispatch::Cleared;
        }

        if term.chars().count() < options.min_length {
            debug!("{} search term '{}' below minimum length", T::KIND, term);
            return SearchDispatch::Ignored;
        }

        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(options.debounce).await;
            if controller.shared.search_ticket.load(Ordering::SeqCst) != ticket {
                debug!("{} search '{}' superseded before firing", T::KIND, term);
                return;
            }
            let result = controller.run_search(&term).await;
            controller.report(result);
        });
        SearchDispatch::Scheduled
    }

    /// Search immediately (Enter key), bypassing the debounce
    pub async fn search_now(&self, term: &str) -> Result<LoadOutcome> {
        let term = term.trim();
        if term.is_empty() {
            return self.clear_search().await;
        }
        if term.chars().count() < self.shared.search.min_length {
            return Ok(LoadOutcome::Skipped(SkipReason::TermTooShort));
        }
        self.cancel_pending_search();
        self.run_search(term).await
    }

    /// Leave search mode: reload page 1 of the listing under the last filter
    pub async fn clear_search(&self) -> Result<LoadOutcome> {
        self.cancel_pending_search();
        self.reload().await
    }

    /// Reload page 1 under the last committed filter
    pub async fn reload(&self) -> Result<LoadOutcome> {
        let filter = self.filter();
        self.load_first_page(filter).await
    }

    /// Drop a debounced search that has not fired yet
    pub fn cancel_pending_search(&self) {
        self.shared.search_ticket.fetch_add(1, Ordering::SeqCst);
    }

    /// Forget everything but the filter; in-flight responses will be discarded
    pub fn reset(&self) {
        self.cancel_pending_search();
        let mut state = self.shared.state.lock();
        let filter = std::mem::take(&mut state.filter);
        let generation = state.generation + 1;
        *state = ListState::new(filter, generation);
        debug!("{} list reset (generation {})", T::KIND, generation);
    }

    async fn run_search(&self, term: &str) -> Result<LoadOutcome> {
        let (generation, filter) = {
            let mut state = self.shared.state.lock();
            let generation = state.begin_reload();
            (generation, state.filter.clone())
        };
        info!("Searching {} for '{}' (generation {})", T::KIND, term, generation);

        let result = self.shared.source.search(term, &filter).await;

        let mut state = self.shared.state.lock();
        if state.generation != generation {
            return Self::discard_stale(result, generation);
        }
        state.reloading = false;
        let page = result?;

        let received = page.items.len();
        state.items = filter.retain(page.items);
        state.page = 1;
        state.has_more = false;
        state.total = page.total;
        state.mode = ListMode::Search;
        state.query = Some(term.to_string());
        let summary = state.summary(received);
        drop(state);

        self.emit(ListEvent::Replaced {
            kind: T::KIND,
            mode: ListMode::Search,
            summary,
        });
        Ok(LoadOutcome::Applied(summary))
    }

    /// Auth failures still propagate; everything else about a stale response is dropped
    fn discard_stale(result: Result<Page<T>>, generation: u64) -> Result<LoadOutcome> {
        match result {
            Err(e) if e.is_auth() => Err(e),
            _ => {
                debug!(
                    "Discarding stale {} response (generation {})",
                    T::KIND,
                    generation
                );
                Ok(LoadOutcome::Superseded)
            }
        }
    }

    /// Surface the result of a background request
    fn report(&self, result: Result<LoadOutcome>) {
        match result {
            Ok(_) => {}
            Err(e) if e.is_auth() => {
                warn!("{} request rejected, session expired", T::KIND);
                self.emit(ListEvent::SessionExpired {
                    kind: T::KIND,
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!("{} background load failed: {}", T::KIND, e);
                self.emit(ListEvent::Failed {
                    kind: T::KIND,
                    status: e.status(),
                    message: e.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: ListEvent) {
        if let Some(events) = &self.shared.events {
            // Receiver gone means nobody renders this list any more
            let _ = events.send(event);
        }
    }
}
