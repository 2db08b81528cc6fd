//! Box shape geometry.

use super::{Shape, ShapeUtil};
use crate::geometry::{bounds_from_points, rotate_with};
use kurbo::{Point, Rect};

/// Geometry for [`ShapeKind::Box`](super::ShapeKind::Box).
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxUtil;

impl ShapeUtil for BoxUtil {
    fn bounds(&self, shape: &Shape) -> Rect {
        Rect::from_origin_size(shape.point, shape.size)
    }

    fn rotated_bounds(&self, shape: &Shape) -> Rect {
        let bounds = self.bounds(shape);
        if shape.rotation == 0.0 {
            return bounds;
        }

        let center = bounds.center();
        let corners = [
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x1, bounds.y0),
            Point::new(bounds.x1, bounds.y1),
            Point::new(bounds.x0, bounds.y1),
        ]
        .map(|corner| rotate_with(corner, center, shape.rotation));
        bounds_from_points(&corners)
    }

    fn center(&self, shape: &Shape) -> Point {
        self.bounds(shape).center()
    }
}
