//! Where scroll-suppressing styles are read and written

use std::fmt;

/// Elements whose `overflow` style controls page scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    Html,
    Body,
}

impl StyleTarget {
    pub const ALL: [StyleTarget; 2] = [StyleTarget::Html, StyleTarget::Body];
}

impl fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleTarget::Html => write!(f, "html"),
            StyleTarget::Body => write!(f, "body"),
        }
    }
}

/// Inline overflow style access
///
/// An empty string means "no inline value", which lets the stylesheet
/// default apply.
pub trait ScrollSurface {
    fn overflow(&self, target: StyleTarget) -> String;
    fn set_overflow(&mut self, target: StyleTarget, value: &str);
}

/// Headless surface that keeps the styles in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    html: String,
    body: String,
    writes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface whose styles start with the given inline values
    pub fn with_overflow(html: &str, body: &str) -> Self {
        Self {
            html: html.to_string(),
            body: body.to_string(),
            writes: 0,
        }
    }

    /// Number of style writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn is_scrollable(&self) -> bool {
        self.html != "hidden" && self.body != "hidden"
    }
}

impl ScrollSurface for MemorySurface {
    fn overflow(&self, target: StyleTarget) -> String {
        match target {
            StyleTarget::Html => self.html.clone(),
            StyleTarget::Body => self.body.clone(),
        }
    }

    fn set_overflow(&mut self, target: StyleTarget, value: &str) {
        self.writes += 1;
        match target {
            StyleTarget::Html => self.html = value.to_string(),
            StyleTarget::Body => self.body = value.to_string(),
        }
    }
}

/// Browser surface writing `document.documentElement` and `document.body`
#[cfg(feature = "web")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DomSurface;

#[cfg(feature = "web")]
impl DomSurface {
    pub fn new() -> Self {
        Self
    }

    fn element(target: StyleTarget) -> Option<web_sys::HtmlElement> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        match target {
            StyleTarget::Html => document.document_element()?.dyn_into().ok(),
            StyleTarget::Body => document.body(),
        }
    }
}

#[cfg(feature = "web")]
impl ScrollSurface for DomSurface {
    fn overflow(&self, target: StyleTarget) -> String {
        Self::element(target)
            .and_then(|el| el.style().get_property_value("overflow").ok())
            .unwrap_or_default()
    }

    fn set_overflow(&mut self, target: StyleTarget, value: &str) {
        let Some(element) = Self::element(target) else {
            tracing::warn!("No {} element to style", target);
            return;
        };
        if element.style().set_property("overflow", value).is_err() {
            tracing::warn!("Failed to set overflow on {}", target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface_tracks_writes() {
        let mut surface = MemorySurface::with_overflow("auto", "");
        assert_eq!(surface.overflow(StyleTarget::Html), "auto");
        assert!(surface.is_scrollable());

        surface.set_overflow(StyleTarget::Body, "hidden");
        assert_eq!(surface.overflow(StyleTarget::Body), "hidden");
        assert!(!surface.is_scrollable());
        assert_eq!(surface.writes(), 1);
    }
}
