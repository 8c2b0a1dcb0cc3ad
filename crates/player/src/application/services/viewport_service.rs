//! Viewport service
//!
//! Publishes the current projection so the map can re-layout on resize
//! without waiting on anything else.

use tokio::sync::watch;
use twelveninja_domain::{AxialCoord, HexLayout, PixelPoint, ViewportController, ViewportSize};

pub struct ViewportService {
    controller: watch::Sender<ViewportController>,
}

impl ViewportService {
    pub fn new(size: ViewportSize) -> Self {
        let (controller, _) = watch::channel(ViewportController::new(size));
        Self { controller }
    }

    /// Apply a container resize. Subscribers are only woken when the
    /// layout actually changed.
    pub fn resize(&self, size: ViewportSize) -> bool {
        let changed = self.controller.send_if_modified(|c| c.resize(size));
        if changed {
            tracing::debug!(width = size.width, height = size.height, "Viewport layout changed");
        }
        changed
    }

    pub fn layout(&self) -> HexLayout {
        self.controller.borrow().layout()
    }

    pub fn size(&self) -> ViewportSize {
        self.controller.borrow().size()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewportController> {
        self.controller.subscribe()
    }

    pub fn project(&self, coord: AxialCoord) -> PixelPoint {
        self.layout().project(coord)
    }

    /// Hex under a click or tap.
    pub fn hit_test(&self, point: PixelPoint) -> AxialCoord {
        self.layout().unproject(point)
    }
}

impl Default for ViewportService {
    fn default() -> Self {
        Self::new(ViewportSize::default())
    }
}
