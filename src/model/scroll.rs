//! Scroll coupling between the input surface and the highlight overlay
//!
//! The input surface is the only thing the user scrolls. Every offset it
//! reports is pushed, synchronously and unchanged, to the overlay and to any
//! other subscriber. There is no batching: each call is delivered in full
//! before `on_surface_scroll` returns.

use std::fmt;

/// Scroll position in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    pub top: f32,
    pub left: f32,
}

impl ScrollOffset {
    pub fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }
}

/// Something that follows the input surface's scroll position
pub trait ScrollObserver {
    fn on_scroll(&mut self, offset: ScrollOffset);
}

/// The read-only highlight layer's viewport
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayViewport {
    pub offset: ScrollOffset,
}

impl ScrollObserver for OverlayViewport {
    fn on_scroll(&mut self, offset: ScrollOffset) {
        self.offset = offset;
    }
}

/// Owns the surface offset and fans it out to the overlay and subscribers
#[derive(Default)]
pub struct ScrollSync {
    surface: ScrollOffset,
    overlay: OverlayViewport,
    subscribers: Vec<Box<dyn ScrollObserver>>,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extra observer; it immediately receives the current offset
    pub fn subscribe(&mut self, mut observer: Box<dyn ScrollObserver>) {
        observer.on_scroll(self.surface);
        self.subscribers.push(observer);
    }

    /// The input surface scrolled
    pub fn on_surface_scroll(&mut self, offset: ScrollOffset) {
        self.surface = offset;
        self.overlay.on_scroll(offset);
        for subscriber in &mut self.subscribers {
            subscriber.on_scroll(offset);
        }
    }

    pub fn surface(&self) -> ScrollOffset {
        self.surface
    }

    pub fn overlay(&self) -> ScrollOffset {
        self.overlay.offset
    }

    pub fn is_synced(&self) -> bool {
        self.surface == self.overlay.offset
    }

    /// Back to the top-left corner (a new file was loaded)
    pub fn reset(&mut self) {
        self.on_surface_scroll(ScrollOffset::default());
    }
}

impl fmt::Debug for ScrollSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSync")
            .field("surface", &self.surface)
            .field("overlay", &self.overlay)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
