//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for a page.
///
/// A screen point maps to the page as `screen / zoom - point`, so `point` is
/// the page-space offset of the view and `zoom` its scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Page-space translation (pan).
    pub point: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            point: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts page coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(self.point)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to page coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(-self.point) * Affine::scale(1.0 / self.zoom)
    }

    pub fn screen_to_page(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn page_to_screen(&self, page_point: Point) -> Point {
        self.transform() * page_point
    }

    /// The part of the page visible through a screen-space viewport.
    pub fn viewport_in_page(&self, viewport: Rect) -> Rect {
        Rect::from_points(
            self.screen_to_page(Point::new(viewport.x0, viewport.y0)),
            self.screen_to_page(Point::new(viewport.x1, viewport.y1)),
        )
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.point -= delta / self.zoom;
    }

    /// Change zoom, keeping the page point under `screen_point` fixed.
    ///
    /// The resulting camera point is rounded to whole units.
    pub fn zoom_about(&mut self, screen_point: Point, next_zoom: f64) {
        let screen = screen_point.to_vec2();
        let p0 = screen / self.zoom - self.point;
        let p1 = screen / next_zoom - self.point;
        self.point = (self.point + (p1 - p0)).round();
        self.zoom = next_zoom;
    }

    /// Pan by `delta` and zoom to `next_zoom` around `screen_point` in one step.
    pub fn pinch(&mut self, screen_point: Point, delta: Vec2, next_zoom: f64) {
        self.pan(delta);
        self.zoom_about(screen_point, next_zoom);
    }

    /// Move `steps` increments of `step` away from the current zoom, around `center`.
    ///
    /// The current zoom is first quantized to the nearest increment. The result
    /// stays within one increment and `max_zoom`, except that a step never moves
    /// against its direction: a camera already outside that range (after a
    /// pinch) stays put when stepping further out of it.
    pub fn step_zoom(&mut self, center: Point, steps: i32, step: f64, max_zoom: f64) {
        let index = (self.zoom / step).round();
        let max_index = (max_zoom / step).floor().max(1.0);
        let target = (index + f64::from(steps)).clamp(1.0, max_index) * step;
        let next = match steps.signum() {
            1 => target.max(self.zoom),
            -1 => target.min(self.zoom),
            _ => target,
        };
        self.zoom_about(center, next);
    }

    /// Fit `bounds` into `viewport` with `padding` screen units to spare.
    ///
    /// A camera already at the fitted zoom, or zoomed out below 100%, is not
    /// zoomed in past 100%.
    pub fn fit_to_bounds(
        &mut self,
        viewport: Rect,
        bounds: Rect,
        padding: f64,
        min_zoom: f64,
        max_zoom: f64,
    ) {
        let fitted = ((viewport.width() - padding) / bounds.width())
            .min((viewport.height() - padding) / bounds.height())
            .clamp(min_zoom, max_zoom);
        let zoom = if (self.zoom - fitted).abs() < f64::EPSILON || self.zoom < 1.0 {
            fitted.min(1.0)
        } else {
            fitted
        };

        let mx = (viewport.width() - bounds.width() * zoom) / 2.0 / zoom;
        let my = (viewport.height() - bounds.height() * zoom) / 2.0 / zoom;
        self.point = Vec2::new(-bounds.x0 + mx, -bounds.y0 + my).round();
        self.zoom = zoom;
    }
}
