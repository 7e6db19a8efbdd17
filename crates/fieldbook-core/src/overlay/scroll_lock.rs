//! Reference-counted page scroll lock
//!
//! Every open overlay holds one unit. The first unit captures the current
//! inline overflow of `html` and `body` and hides them; the last release
//! puts the captured values back. Releasing with no units held does
//! nothing, so duplicate close calls are harmless.

use tracing::{debug, info, warn};

use super::surface::{ScrollSurface, StyleTarget};

const HIDDEN: &str = "hidden";

/// Inline overflow values captured on the 0 -> 1 transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SavedOverflow {
    html: String,
    body: String,
}

impl SavedOverflow {
    fn capture<S: ScrollSurface>(surface: &S) -> Self {
        Self {
            html: surface.overflow(StyleTarget::Html),
            body: surface.overflow(StyleTarget::Body),
        }
    }

    fn value(&self, target: StyleTarget) -> &str {
        match target {
            StyleTarget::Html => &self.html,
            StyleTarget::Body => &self.body,
        }
    }
}

/// Scroll suppression shared by every overlay of one page
#[derive(Debug)]
pub struct ScrollLockManager<S: ScrollSurface> {
    surface: S,
    lock_count: usize,
    saved: Option<SavedOverflow>,
}

impl<S: ScrollSurface> ScrollLockManager<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            lock_count: 0,
            saved: None,
        }
    }

    /// Take one lock unit on behalf of `source`
    pub fn acquire(&mut self, source: &str) {
        if self.lock_count == 0 {
            self.saved = Some(SavedOverflow::capture(&self.surface));
            for target in StyleTarget::ALL {
                self.surface.set_overflow(target, HIDDEN);
            }
        }
        self.lock_count += 1;
        debug!("Scroll locked by {} (count {})", source, self.lock_count);
    }

    /// Give back one lock unit; a no-op when none are held
    pub fn release(&mut self, source: &str) {
        if self.lock_count == 0 {
            debug!("Scroll release from {} with no lock held", source);
            return;
        }
        self.lock_count -= 1;
        if self.lock_count == 0 {
            let saved = self.saved.take().unwrap_or_default();
            for target in StyleTarget::ALL {
                self.surface.set_overflow(target, saved.value(target));
            }
        }
        debug!("Scroll released by {} (count {})", source, self.lock_count);
    }

    /// Drop every unit and clear the inline styles
    ///
    /// Recovery path for an overlay whose teardown failed.
    pub fn force_release(&mut self) {
        if self.lock_count > 0 {
            warn!("Forcing scroll unlock with {} units held", self.lock_count);
        }
        self.lock_count = 0;
        self.saved = None;
        for target in StyleTarget::ALL {
            self.surface.set_overflow(target, "");
        }
        info!("Scroll lock force-released");
    }

    pub fn lock_count(&self) -> usize {
        self.lock_count
    }

    pub fn is_locked(&self) -> bool {
        self.lock_count > 0
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::surface::MemorySurface;

    fn manager(html: &str, body: &str) -> ScrollLockManager<MemorySurface> {
        ScrollLockManager::new(MemorySurface::with_overflow(html, body))
    }

    #[test]
    fn test_acquire_release_restores_exact_values() {
        let mut lock = manager("scroll", "auto");

        lock.acquire("product-modal");
        assert!(lock.is_locked());
        assert_eq!(lock.surface().overflow(StyleTarget::Html), "hidden");
        assert_eq!(lock.surface().overflow(StyleTarget::Body), "hidden");

        lock.release("product-modal");
        assert!(!lock.is_locked());
        assert_eq!(lock.surface().overflow(StyleTarget::Html), "scroll");
        assert_eq!(lock.surface().overflow(StyleTarget::Body), "auto");
    }

    #[test]
    fn test_nested_locks_need_matching_releases() {
        let mut lock = manager("", "");
        for n in 0..4 {
            lock.acquire(&format!("overlay-{}", n));
        }
        // Only the first acquire touches the styles
        assert_eq!(lock.surface().writes(), 2);

        for n in 0..3 {
            lock.release(&format!("overlay-{}", n));
            assert!(lock.is_locked());
            assert!(!lock.surface().is_scrollable());
        }
        lock.release("overlay-3");
        assert_eq!(lock.lock_count(), 0);
        assert!(lock.surface().is_scrollable());
    }

    #[test]
    fn test_release_underflow_is_ignored() {
        let mut lock = manager("auto", "");
        lock.release("stray");
        lock.release("stray");
        assert_eq!(lock.lock_count(), 0);
        assert_eq!(lock.surface().writes(), 0);

        lock.acquire("modal");
        lock.release("modal");
        lock.release("modal");
        assert_eq!(lock.lock_count(), 0);
        assert_eq!(lock.surface().overflow(StyleTarget::Html), "auto");
    }

    #[test]
    fn test_count_matches_clamped_difference() {
        // true = acquire, false = release
        let sequence = [
            true, false, false, true, true, false, true, false, false, false, true,
        ];
        let mut lock = manager("", "");
        let mut expected = 0usize;
        for (i, acquire) in sequence.iter().enumerate() {
            if *acquire {
                lock.acquire("seq");
                expected += 1;
            } else {
                lock.release("seq");
                expected = expected.saturating_sub(1);
            }
            assert_eq!(lock.lock_count(), expected, "after step {}", i);
            assert_eq!(lock.surface().is_scrollable(), expected == 0);
        }
    }

    #[test]
    fn test_force_release_always_unlocks() {
        let mut lock = manager("scroll", "scroll");
        lock.acquire("a");
        lock.acquire("b");

        lock.force_release();
        assert_eq!(lock.lock_count(), 0);
        assert_eq!(lock.surface().overflow(StyleTarget::Html), "");
        assert_eq!(lock.surface().overflow(StyleTarget::Body), "");

        // Fresh cycle captures the cleared values
        lock.acquire("c");
        lock.release("c");
        assert_eq!(lock.surface().overflow(StyleTarget::Html), "");

        let mut idle = manager("", "");
        idle.force_release();
        assert!(!idle.is_locked());
    }
}
