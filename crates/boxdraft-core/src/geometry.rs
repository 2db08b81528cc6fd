//! Bounds and point helpers shared by the editor actions.

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned box together with its precomputed center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsWithCenter {
    pub bounds: Rect,
    pub center: Point,
}

impl BoundsWithCenter {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            center: bounds.center(),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.bounds.x0
    }

    pub fn mid_x(&self) -> f64 {
        self.center.x
    }

    pub fn max_x(&self) -> f64 {
        self.bounds.x1
    }

    pub fn min_y(&self) -> f64 {
        self.bounds.y0
    }

    pub fn mid_y(&self) -> f64 {
        self.center.y
    }

    pub fn max_y(&self) -> f64 {
        self.bounds.y1
    }
}

/// Smallest box containing all `points`. Returns a zero rect at the origin for an empty slice.
pub fn bounds_from_points(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |acc, p| {
            acc.union_pt(*p)
        })
}

/// Union of all `bounds`, or `None` when there are none.
pub fn common_bounds(bounds: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    bounds.into_iter().reduce(|acc, b| acc.union(b))
}

/// Whether `outer` strictly contains `inner`.
pub fn bounds_contain(outer: Rect, inner: Rect) -> bool {
    outer.x0 < inner.x0 && outer.y0 < inner.y0 && outer.x1 > inner.x1 && outer.y1 > inner.y1
}

/// Whether two boxes overlap. Touching edges count as a collision.
pub fn bounds_collide(a: Rect, b: Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

pub fn translate_bounds(bounds: Rect, delta: Vec2) -> Rect {
    Rect::new(
        bounds.x0 + delta.x,
        bounds.y0 + delta.y,
        bounds.x1 + delta.x,
        bounds.y1 + delta.y,
    )
}

/// Angle in radians of the ray from `from` to `to`.
pub fn angle_between(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Rotate `point` around `center` by `angle` radians.
pub fn rotate_with(point: Point, center: Point, angle: f64) -> Point {
    Affine::rotate_about(angle, center) * point
}

/// Zero out the smaller component of `delta`, locking movement to its dominant axis.
pub fn lock_to_dominant_axis(delta: Vec2) -> Vec2 {
    if delta.x.abs() > delta.y.abs() {
        Vec2::new(delta.x, 0.0)
    } else {
        Vec2::new(0.0, delta.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points_normalizes() {
        let bounds = bounds_from_points(&[Point::new(50.0, 10.0), Point::new(10.0, 40.0)]);
        assert_eq!(bounds, Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn test_bounds_from_no_points() {
        assert_eq!(bounds_from_points(&[]), Rect::ZERO);
    }

    #[test]
    fn test_common_bounds() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, -5.0, 30.0, 5.0);
        assert_eq!(common_bounds([a, b]), Some(Rect::new(0.0, -5.0, 30.0, 10.0)));
        assert_eq!(common_bounds(Vec::<Rect>::new()), None);
    }

    #[test]
    fn test_contain_is_strict() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(bounds_contain(outer, Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!bounds_contain(outer, Rect::new(0.0, 10.0, 20.0, 20.0)));
        assert!(!bounds_contain(outer, Rect::new(90.0, 90.0, 120.0, 120.0)));
    }

    #[test]
    fn test_collide_includes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(bounds_collide(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(bounds_collide(a, Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!bounds_collide(a, Rect::new(11.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_rotate_with_quarter_turn() {
        let rotated = rotate_with(Point::new(10.0, 0.0), Point::ZERO, std::f64::consts::FRAC_PI_2);
        assert!(rotated.x.abs() < 1e-9);
        assert!((rotated.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_between() {
        let angle = angle_between(Point::new(0.0, 0.0), Point::new(0.0, 5.0));
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_lock_to_dominant_axis() {
        assert_eq!(lock_to_dominant_axis(Vec2::new(10.0, 3.0)), Vec2::new(10.0, 0.0));
        assert_eq!(lock_to_dominant_axis(Vec2::new(-2.0, 7.0)), Vec2::new(0.0, 7.0));
        // Ties favor the vertical axis
        assert_eq!(lock_to_dominant_axis(Vec2::new(4.0, 4.0)), Vec2::new(0.0, 4.0));
    }
}
