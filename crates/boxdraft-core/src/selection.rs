//! Selection handle system and bounding-box transform math.

use crate::geometry::rotate_with;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Distance from the top edge to the rotation handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A named control point on the selection's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsHandle {
    Corner(Corner),
    Edge(Edge),
    /// Rotation handle, above the top edge.
    Rotate,
}

impl BoundsHandle {
    pub fn is_rotate(self) -> bool {
        matches!(self, BoundsHandle::Rotate)
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            BoundsHandle::Edge(Edge::Top)
                | BoundsHandle::Corner(Corner::TopLeft)
                | BoundsHandle::Corner(Corner::TopRight)
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            BoundsHandle::Edge(Edge::Bottom)
                | BoundsHandle::Corner(Corner::BottomLeft)
                | BoundsHandle::Corner(Corner::BottomRight)
        )
    }

    fn moves_left(self) -> bool {
        matches!(
            self,
            BoundsHandle::Edge(Edge::Left)
                | BoundsHandle::Corner(Corner::TopLeft)
                | BoundsHandle::Corner(Corner::BottomLeft)
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            BoundsHandle::Edge(Edge::Right)
                | BoundsHandle::Corner(Corner::TopRight)
                | BoundsHandle::Corner(Corner::BottomRight)
        )
    }
}

/// A selection handle with its position and kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in page coordinates.
    pub position: Point,
    pub kind: BoundsHandle,
}

impl Handle {
    pub fn new(position: Point, kind: BoundsHandle) -> Self {
        Self { position, kind }
    }

    /// Check if a page point hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Handles for a selection box rotated by `rotation` around its center.
///
/// Corners come first so they win over edges when handles overlap on tiny boxes.
/// The rotate handle keeps a constant on-screen distance from the top edge.
pub fn selection_handles(bounds: Rect, rotation: f64, zoom: f64) -> Vec<Handle> {
    let center = bounds.center();
    let rotate_offset = ROTATE_HANDLE_OFFSET / zoom;
    let at = |x: f64, y: f64| rotate_with(Point::new(x, y), center, rotation);

    vec![
        Handle::new(at(bounds.x0, bounds.y0), BoundsHandle::Corner(Corner::TopLeft)),
        Handle::new(at(bounds.x1, bounds.y0), BoundsHandle::Corner(Corner::TopRight)),
        Handle::new(at(bounds.x1, bounds.y1), BoundsHandle::Corner(Corner::BottomRight)),
        Handle::new(at(bounds.x0, bounds.y1), BoundsHandle::Corner(Corner::BottomLeft)),
        Handle::new(at(center.x, bounds.y0), BoundsHandle::Edge(Edge::Top)),
        Handle::new(at(bounds.x1, center.y), BoundsHandle::Edge(Edge::Right)),
        Handle::new(at(center.x, bounds.y1), BoundsHandle::Edge(Edge::Bottom)),
        Handle::new(at(bounds.x0, center.y), BoundsHandle::Edge(Edge::Left)),
        Handle::new(at(center.x, bounds.y0 - rotate_offset), BoundsHandle::Rotate),
    ]
}

/// Find the handle under a page point, if any.
pub fn hit_test_handles(
    bounds: Rect,
    rotation: f64,
    point: Point,
    tolerance: f64,
    zoom: f64,
) -> Option<BoundsHandle> {
    let tolerance = tolerance / zoom;
    selection_handles(bounds, rotation, zoom)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Result of dragging a handle: the new box plus signed scale factors.
///
/// A negative scale means the box was dragged past its opposite edge on that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedBounds {
    pub bounds: Rect,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Resize `bounds` by dragging `handle` by `delta`.
///
/// `rotation` is the rotation of the box around its center; the delta is
/// counter-rotated so the math happens on the axis-aligned box, and the anchor
/// opposite the handle stays fixed on the page. With `lock_aspect` the result
/// keeps the original aspect ratio, the dominant axis of the drag winning.
/// The rotate handle translates the box.
pub fn transformed_bounding_box(
    bounds: Rect,
    handle: BoundsHandle,
    delta: Vec2,
    rotation: f64,
    lock_aspect: bool,
) -> TransformedBounds {
    let (ax0, ay0, ax1, ay1) = (bounds.x0, bounds.y0, bounds.x1, bounds.y1);
    let (mut bx0, mut by0, mut bx1, mut by1) = (ax0, ay0, ax1, ay1);

    if handle.is_rotate() {
        return TransformedBounds {
            bounds: Rect::new(bx0 + delta.x, by0 + delta.y, bx1 + delta.x, by1 + delta.y),
            scale_x: 1.0,
            scale_y: 1.0,
        };
    }

    let local = rotate_with(delta.to_point(), Point::ZERO, -rotation).to_vec2();

    if handle.moves_top() {
        by0 += local.y;
    } else if handle.moves_bottom() {
        by1 += local.y;
    }
    if handle.moves_left() {
        bx0 += local.x;
    } else if handle.moves_right() {
        bx1 += local.x;
    }

    let aw = ax1 - ax0;
    let ah = ay1 - ay0;
    let scale_x = (bx1 - bx0) / aw;
    let scale_y = (by1 - by0) / ah;
    let flip_x = scale_x < 0.0;
    let flip_y = scale_y < 0.0;

    if lock_aspect {
        let bw = (bx1 - bx0).abs();
        let bh = (by1 - by0).abs();
        // A degenerate box has no meaningful ratio; treat it as square.
        let ar = if aw > 0.0 && ah > 0.0 { aw / ah } else { 1.0 };
        let is_tall = ar < bw / bh;
        let tw = bw * if scale_y < 0.0 { 1.0 } else { -1.0 } / ar;
        let th = bh * if scale_x < 0.0 { 1.0 } else { -1.0 } * ar;

        match handle {
            BoundsHandle::Corner(Corner::TopLeft) => {
                if is_tall {
                    by0 = by1 + tw;
                } else {
                    bx0 = bx1 + th;
                }
            }
            BoundsHandle::Corner(Corner::TopRight) => {
                if is_tall {
                    by0 = by1 + tw;
                } else {
                    bx1 = bx0 - th;
                }
            }
            BoundsHandle::Corner(Corner::BottomRight) => {
                if is_tall {
                    by1 = by0 - tw;
                } else {
                    bx1 = bx0 - th;
                }
            }
            BoundsHandle::Corner(Corner::BottomLeft) => {
                if is_tall {
                    by1 = by0 - tw;
                } else {
                    bx0 = bx1 + th;
                }
            }
            BoundsHandle::Edge(Edge::Top | Edge::Bottom) => {
                let mid = (bx0 + bx1) / 2.0;
                let w = bh * ar;
                bx0 = mid - w / 2.0;
                bx1 = mid + w / 2.0;
            }
            BoundsHandle::Edge(Edge::Left | Edge::Right) => {
                let mid = (by0 + by1) / 2.0;
                let h = bw / ar;
                by0 = mid - h / 2.0;
                by1 = mid + h / 2.0;
            }
            BoundsHandle::Rotate => {}
        }
    }

    // Keep the anchor opposite the handle fixed on the page when rotated.
    if rotation % std::f64::consts::TAU != 0.0 {
        let c0 = Point::new((ax0 + ax1) / 2.0, (ay0 + ay1) / 2.0);
        let c1 = Point::new((bx0 + bx1) / 2.0, (by0 + by1) / 2.0);
        let (next_anchor, prev_anchor) = match handle {
            BoundsHandle::Corner(Corner::TopLeft) => (Point::new(bx1, by1), Point::new(ax1, ay1)),
            BoundsHandle::Corner(Corner::TopRight) => (Point::new(bx0, by1), Point::new(ax0, ay1)),
            BoundsHandle::Corner(Corner::BottomRight) => {
                (Point::new(bx0, by0), Point::new(ax0, ay0))
            }
            BoundsHandle::Corner(Corner::BottomLeft) => {
                (Point::new(bx1, by0), Point::new(ax1, ay0))
            }
            BoundsHandle::Edge(Edge::Top) => (Point::new(c1.x, by1), Point::new(c0.x, ay1)),
            BoundsHandle::Edge(Edge::Left) => (Point::new(bx1, c1.y), Point::new(ax1, c0.y)),
            BoundsHandle::Edge(Edge::Bottom) => (Point::new(c1.x, by0), Point::new(c0.x, ay0)),
            BoundsHandle::Edge(Edge::Right) => (Point::new(bx0, c1.y), Point::new(ax0, c0.y)),
            BoundsHandle::Rotate => (c1, c0),
        };
        let correction =
            rotate_with(next_anchor, c1, rotation) - rotate_with(prev_anchor, c0, rotation);
        bx0 -= correction.x;
        by0 -= correction.y;
        bx1 -= correction.x;
        by1 -= correction.y;
    }

    if bx1 < bx0 {
        std::mem::swap(&mut bx0, &mut bx1);
    }
    if by1 < by0 {
        std::mem::swap(&mut by0, &mut by1);
    }

    let width = bx1 - bx0;
    let height = by1 - by0;
    TransformedBounds {
        bounds: Rect::new(bx0, by0, bx1, by1),
        scale_x: width / non_zero(aw) * if flip_x { -1.0 } else { 1.0 },
        scale_y: height / non_zero(ah) * if flip_y { -1.0 } else { 1.0 },
    }
}

/// Map `shape_bounds` from `initial_bounds` into `next_bounds`, keeping its
/// relative position and size. Flipped axes mirror the shape inside the box.
pub fn relative_transformed_bounding_box(
    next_bounds: Rect,
    initial_bounds: Rect,
    shape_bounds: Rect,
    flip_x: bool,
    flip_y: bool,
) -> Rect {
    let iw = non_zero(initial_bounds.width());
    let ih = non_zero(initial_bounds.height());

    let nx = if flip_x {
        initial_bounds.x1 - shape_bounds.x1
    } else {
        shape_bounds.x0 - initial_bounds.x0
    } / iw;
    let ny = if flip_y {
        initial_bounds.y1 - shape_bounds.y1
    } else {
        shape_bounds.y0 - initial_bounds.y0
    } / ih;
    let nw = shape_bounds.width() / iw;
    let nh = shape_bounds.height() / ih;

    let x0 = next_bounds.x0 + next_bounds.width() * nx;
    let y0 = next_bounds.y0 + next_bounds.height() * ny;
    Rect::new(
        x0,
        y0,
        x0 + next_bounds.width() * nw,
        y0 + next_bounds.height() * nh,
    )
}

fn non_zero(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_rect(actual: Rect, expected: Rect) {
        assert!(
            (actual.x0 - expected.x0).abs() < EPS
                && (actual.y0 - expected.y0).abs() < EPS
                && (actual.x1 - expected.x1).abs() < EPS
                && (actual.y1 - expected.y1).abs() < EPS,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_handle_hit_test() {
        let handle = Handle::new(Point::new(100.0, 100.0), BoundsHandle::Rotate);
        assert!(handle.hit_test(Point::new(105.0, 100.0), 8.0));
        assert!(!handle.hit_test(Point::new(110.0, 100.0), 8.0));
    }

    #[test]
    fn test_selection_handles_layout() {
        let handles = selection_handles(Rect::new(0.0, 0.0, 100.0, 50.0), 0.0, 1.0);
        assert_eq!(handles.len(), 9);
        assert_eq!(handles[2].position, Point::new(100.0, 50.0));
        assert_eq!(handles[2].kind, BoundsHandle::Corner(Corner::BottomRight));
        assert_eq!(handles[5].position, Point::new(100.0, 25.0));
        let rotate = handles[8];
        assert_eq!(rotate.kind, BoundsHandle::Rotate);
        assert!((rotate.position.y + ROTATE_HANDLE_OFFSET).abs() < EPS);
    }

    #[test]
    fn test_rotate_handle_offset_scales_with_zoom() {
        let handles = selection_handles(Rect::new(0.0, 0.0, 100.0, 50.0), 0.0, 2.0);
        assert!((handles[8].position.y + ROTATE_HANDLE_OFFSET / 2.0).abs() < EPS);
    }

    #[test]
    fn test_hit_test_handles() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(
            hit_test_handles(bounds, 0.0, Point::new(2.0, 49.0), HANDLE_HIT_TOLERANCE, 1.0),
            Some(BoundsHandle::Corner(Corner::BottomLeft))
        );
        assert_eq!(
            hit_test_handles(bounds, 0.0, Point::new(50.0, 1.0), HANDLE_HIT_TOLERANCE, 1.0),
            Some(BoundsHandle::Edge(Edge::Top))
        );
        assert_eq!(
            hit_test_handles(bounds, 0.0, Point::new(50.0, 25.0), HANDLE_HIT_TOLERANCE, 1.0),
            None
        );
    }

    #[test]
    fn test_bottom_right_resize() {
        let result = transformed_bounding_box(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            BoundsHandle::Corner(Corner::BottomRight),
            Vec2::new(20.0, 10.0),
            0.0,
            false,
        );
        assert_rect(result.bounds, Rect::new(0.0, 0.0, 120.0, 60.0));
        assert!((result.scale_x - 1.2).abs() < EPS);
        assert!((result.scale_y - 1.2).abs() < EPS);
    }

    #[test]
    fn test_edge_resize_moves_single_axis() {
        let result = transformed_bounding_box(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            BoundsHandle::Edge(Edge::Left),
            Vec2::new(10.0, 30.0),
            0.0,
            false,
        );
        assert_rect(result.bounds, Rect::new(10.0, 0.0, 100.0, 50.0));
        assert!((result.scale_y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_drag_past_opposite_corner_flips() {
        let result = transformed_bounding_box(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            BoundsHandle::Corner(Corner::BottomRight),
            Vec2::new(-150.0, -80.0),
            0.0,
            false,
        );
        assert_rect(result.bounds, Rect::new(-50.0, -30.0, 0.0, 0.0));
        assert!(result.scale_x < 0.0);
        assert!(result.scale_y < 0.0);
        assert!((result.scale_x + 0.5).abs() < EPS);
    }

    #[test]
    fn test_aspect_lock_dominant_axis_wins() {
        let result = transformed_bounding_box(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            BoundsHandle::Corner(Corner::BottomRight),
            Vec2::new(90.0, 10.0),
            0.0,
            true,
        );
        assert_rect(result.bounds, Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_aspect_lock_on_edge_centers_other_axis() {
        let result = transformed_bounding_box(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            BoundsHandle::Edge(Edge::Bottom),
            Vec2::new(0.0, 50.0),
            0.0,
            true,
        );
        // Height doubles, width follows around the same center
        assert_rect(result.bounds, Rect::new(-50.0, 0.0, 150.0, 100.0));
    }

    #[test]
    fn test_rotated_resize_keeps_anchor_fixed() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let rotation = std::f64::consts::FRAC_PI_2;
        let anchor_before = rotate_with(Point::new(0.0, 0.0), bounds.center(), rotation);

        // Screen-space drag along the rotated x axis grows the width
        let result = transformed_bounding_box(
            bounds,
            BoundsHandle::Corner(Corner::BottomRight),
            Vec2::new(0.0, 20.0),
            rotation,
            false,
        );
        assert!((result.bounds.width() - 120.0).abs() < EPS);
        assert!((result.bounds.height() - 50.0).abs() < EPS);

        let next = result.bounds;
        let anchor_after = rotate_with(Point::new(next.x0, next.y0), next.center(), rotation);
        assert!((anchor_after - anchor_before).hypot() < EPS);
    }

    #[test]
    fn test_rotate_handle_translates() {
        let result = transformed_bounding_box(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            BoundsHandle::Rotate,
            Vec2::new(5.0, 5.0),
            0.0,
            false,
        );
        assert_rect(result.bounds, Rect::new(5.0, 5.0, 15.0, 15.0));
    }

    #[test]
    fn test_relative_box_scales_proportionally() {
        let initial = Rect::new(0.0, 0.0, 100.0, 100.0);
        let next = Rect::new(0.0, 0.0, 200.0, 100.0);
        let shape = Rect::new(50.0, 0.0, 100.0, 50.0);
        let mapped = relative_transformed_bounding_box(next, initial, shape, false, false);
        assert_rect(mapped, Rect::new(100.0, 0.0, 200.0, 50.0));
    }

    #[test]
    fn test_relative_box_mirrors_when_flipped() {
        let initial = Rect::new(0.0, 0.0, 100.0, 100.0);
        let next = Rect::new(-100.0, 0.0, 0.0, 100.0);
        let shape = Rect::new(0.0, 0.0, 25.0, 100.0);
        let mapped = relative_transformed_bounding_box(next, initial, shape, true, false);
        // The leftmost shape ends up at the right end of the mirrored box
        assert_rect(mapped, Rect::new(-25.0, 0.0, 0.0, 100.0));
    }

    #[test]
    fn test_relative_box_tolerates_degenerate_initial() {
        let initial = Rect::new(10.0, 10.0, 10.0, 10.0);
        let mapped = relative_transformed_bounding_box(
            Rect::new(10.0, 10.0, 20.0, 20.0),
            initial,
            initial,
            false,
            false,
        );
        assert!(mapped.x0.is_finite() && mapped.y1.is_finite());
    }
}
