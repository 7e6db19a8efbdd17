//! Modal overlays and page scroll suppression
//!
//! `ScrollLockManager` is a reference counter over the page's overflow
//! styles: scrolling stays disabled while any overlay holds a unit.
//! `OverlayStack` ties each open overlay to exactly one unit.

pub mod scroll_lock;
pub mod stack;
pub mod surface;

pub use scroll_lock::ScrollLockManager;
pub use stack::{OverlayId, OverlayStack};
#[cfg(feature = "web")]
pub use surface::DomSurface;
pub use surface::{MemorySurface, ScrollSurface, StyleTarget};
