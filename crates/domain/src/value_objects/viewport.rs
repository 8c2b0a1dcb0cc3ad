//! Viewport-driven layout: hex size breakpoints and projection origin.

use serde::{Deserialize, Serialize};

use super::hex::{HexLayout, HexSize};

/// Container widths below this use the small hex size.
pub const SMALL_BREAKPOINT: f64 = 640.0;
/// Container widths at or above this use the large hex size.
pub const LARGE_BREAKPOINT: f64 = 1024.0;

pub const SMALL_HEX: HexSize = HexSize::new(25.0, 28.0);
pub const MEDIUM_HEX: HexSize = HexSize::new(40.0, 46.0);
pub const LARGE_HEX: HexSize = HexSize::new(55.0, 63.0);

/// Hex size for a container of the given pixel width.
pub fn hex_size_for_width(container_width: f64) -> HexSize {
    if container_width < SMALL_BREAKPOINT {
        SMALL_HEX
    } else if container_width < LARGE_BREAKPOINT {
        MEDIUM_HEX
    } else {
        LARGE_HEX
    }
}

/// Pixel dimensions of the map container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Geometric centre of the container.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Derives the projection layout from the container size.
///
/// Recomputes from scratch on every resize, so feeding it the same
/// dimensions twice always yields the same layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    size: ViewportSize,
    layout: HexLayout,
}

impl ViewportController {
    pub fn new(size: ViewportSize) -> Self {
        Self {
            size,
            layout: Self::layout_for(size),
        }
    }

    pub fn layout_for(size: ViewportSize) -> HexLayout {
        let (origin_x, origin_y) = size.center();
        HexLayout::new(origin_x, origin_y, hex_size_for_width(size.width))
    }

    /// Apply a resize notification. Returns `true` when the layout changed.
    pub fn resize(&mut self, size: ViewportSize) -> bool {
        let layout = Self::layout_for(size);
        let changed = layout != self.layout;
        self.size = size;
        self.layout = layout;
        changed
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    pub fn layout(&self) -> HexLayout {
        self.layout
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportSize::default())
    }
}
