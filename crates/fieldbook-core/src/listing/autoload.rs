//! Auto-load when the end of a list scrolls into view
//!
//! Visibility is computed from plain geometry: the viewport is expanded
//! by a root margin and the load-more sentinel counts as visible once the
//! given fraction of it overlaps. A visible sentinel calls
//! `load_next_page` directly; the manual "Load More" action stays the
//! complete fallback when no geometry is available.

use tracing::debug;

use super::controller::{LoadOutcome, PagedListController, SkipReason};
use crate::constants::autoload;
use crate::entities::Entity;
use crate::error::Result;

/// Visible window of the scroll container, in content coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
}

/// Vertical extent of the load-more sentinel, in content coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub height: f32,
}

/// Visibility-based trigger for `load_next_page`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoLoadTrigger {
    root_margin: f32,
    threshold: f32,
    available: bool,
}

impl Default for AutoLoadTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoLoadTrigger {
    pub fn new() -> Self {
        Self {
            root_margin: autoload::ROOT_MARGIN_PX,
            threshold: autoload::THRESHOLD,
            available: true,
        }
    }

    /// Trigger for hosts that cannot report geometry; never fires
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn with_root_margin(mut self, margin: f32) -> Self {
        self.root_margin = margin.max(0.0);
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Whether the sentinel counts as visible in the margin-expanded viewport
    pub fn intersects(&self, viewport: Viewport, sentinel: Bounds) -> bool {
        let view_start = viewport.scroll_top - self.root_margin;
        let view_end = viewport.scroll_top + viewport.height.max(0.0) + self.root_margin;
        let sentinel_end = sentinel.top + sentinel.height.max(0.0);

        if sentinel.height <= 0.0 {
            return sentinel.top >= view_start && sentinel.top <= view_end;
        }

        let overlap = sentinel_end.min(view_end) - sentinel.top.max(view_start);
        if overlap <= 0.0 {
            return false;
        }
        overlap / sentinel.height >= self.threshold
    }

    /// React to a scroll/resize: load the next page if the sentinel is visible
    pub async fn on_scroll<T: Entity>(
        &self,
        list: &PagedListController<T>,
        viewport: Viewport,
        sentinel: Bounds,
    ) -> Result<LoadOutcome> {
        if !self.available {
            return Ok(LoadOutcome::Skipped(SkipReason::TriggerUnavailable));
        }
        // A disarmed list reports its own skip reason without a request
        if list.auto_load_armed() && !self.intersects(viewport, sentinel) {
            return Ok(LoadOutcome::Skipped(SkipReason::NotVisible));
        }

        debug!("Auto-load check passed for {}", list.kind());
        list.load_next_page().await
    }
}
