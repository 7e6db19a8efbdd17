//! Stack of open overlays, each holding one scroll lock unit

use std::fmt;

use tracing::{debug, error};

use super::scroll_lock::ScrollLockManager;
use super::surface::ScrollSurface;

/// Handle to an open overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

#[derive(Debug)]
struct OpenOverlay {
    id: OverlayId,
    source: String,
}

/// Open overlays in stacking order (last is topmost)
#[derive(Debug)]
pub struct OverlayStack<S: ScrollSurface> {
    lock: ScrollLockManager<S>,
    open: Vec<OpenOverlay>,
    next_id: u64,
}

impl<S: ScrollSurface> OverlayStack<S> {
    pub fn new(surface: S) -> Self {
        Self {
            lock: ScrollLockManager::new(surface),
            open: Vec::new(),
            next_id: 1,
        }
    }

    /// Open an overlay named `source` on top of the stack
    pub fn open(&mut self, source: impl Into<String>) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        let source = source.into();
        self.lock.acquire(&source);
        debug!("Opened {} ({})", id, source);
        self.open.push(OpenOverlay { id, source });
        id
    }

    /// Close an overlay; returns false if it was not open
    pub fn close(&mut self, id: OverlayId) -> bool {
        match self.remove(id) {
            Some(overlay) => {
                self.lock.release(&overlay.source);
                debug!("Closed {} ({})", id, overlay.source);
                true
            }
            None => false,
        }
    }

    /// Close an overlay after running its teardown
    ///
    /// If the teardown fails the scroll lock is force-released, which drops
    /// the units of every open overlay. All of them are forgotten with it,
    /// so a later `close` of a stale handle cannot release a unit taken by
    /// an overlay opened afterwards.
    pub fn close_with<F, E>(&mut self, id: OverlayId, teardown: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
        E: fmt::Display,
    {
        if !self.is_open(id) {
            return Ok(());
        }
        match teardown() {
            Ok(()) => {
                self.close(id);
                Ok(())
            }
            Err(e) => {
                error!("Teardown of {} failed: {}", id, e);
                for overlay in self.open.drain(..) {
                    debug!("Abandoned {} ({})", overlay.id, overlay.source);
                }
                self.lock.force_release();
                Err(e)
            }
        }
    }

    /// Close the topmost overlay (Escape key)
    pub fn close_top(&mut self) -> Option<OverlayId> {
        let id = self.top()?;
        self.close(id);
        Some(id)
    }

    /// Close every overlay, topmost first
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        while self.close_top().is_some() {
            closed += 1;
        }
        closed
    }

    pub fn is_open(&self, id: OverlayId) -> bool {
        self.open.iter().any(|o| o.id == id)
    }

    pub fn top(&self) -> Option<OverlayId> {
        self.open.last().map(|o| o.id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn lock(&self) -> &ScrollLockManager<S> {
        &self.lock
    }

    fn remove(&mut self, id: OverlayId) -> Option<OpenOverlay> {
        let index = self.open.iter().position(|o| o.id == id)?;
        Some(self.open.remove(index))
    }
}
