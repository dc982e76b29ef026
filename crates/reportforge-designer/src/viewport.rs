//! Viewport and coordinate transformation for the design surface.
//!
//! Converts between scene coordinates (pixels on the canvas widget, origin
//! top-left) and page coordinates (report units, origin at the page's
//! top-left corner). Both axes grow right and down.

use std::fmt;

use crate::model::Point;

pub const DEFAULT_MIN_ZOOM: f64 = 0.2;
pub const DEFAULT_MAX_ZOOM: f64 = 4.0;
pub const DEFAULT_ZOOM_STEP: f64 = 0.1;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    /// Creates a viewport at 1:1 zoom with the given zoom limits.
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            pan_x: 0.0,
            pan_y: 0.0,
            min_zoom,
            max_zoom,
        }
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the configured limits and rounded
    /// to one decimal.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = round_to_tenth(zoom.clamp(self.min_zoom, self.max_zoom));
    }

    pub fn zoom_in(&mut self, step: f64) {
        self.set_zoom(self.zoom + step);
    }

    pub fn zoom_out(&mut self, step: f64) {
        self.set_zoom(self.zoom - step);
    }

    /// Resets zoom to 1.0 (100%).
    pub fn reset_zoom(&mut self) {
        self.set_zoom(1.0);
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Gets the pan offset in scene pixels.
    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts scene coordinates to page coordinates.
    ///
    /// ```text
    /// page = (scene - pan) / zoom
    /// ```
    pub fn scene_to_page(&self, scene: Point) -> Point {
        Point::new(
            (scene.x - self.pan_x) / self.zoom,
            (scene.y - self.pan_y) / self.zoom,
        )
    }

    /// Converts page coordinates to scene coordinates.
    pub fn page_to_scene(&self, page: Point) -> Point {
        Point::new(
            page.x * self.zoom + self.pan_x,
            page.y * self.zoom + self.pan_y,
        )
    }

    /// Resets viewport to default state (1:1 zoom, no pan).
    pub fn reset(&mut self) {
        self.reset_zoom();
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Pan: ({:.1}, {:.1})",
            self.zoom * 100.0,
            self.pan_x,
            self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }
}
