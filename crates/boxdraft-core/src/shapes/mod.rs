//! Shape definitions for the canvas.
//!
//! Shapes are plain data. Per-type geometry (bounds, rotated bounds, center)
//! lives behind the [`ShapeUtil`] capability, looked up by [`ShapeKind`].

mod boxes;

pub use boxes::BoxUtil;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Type tag of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned rectangle, optionally rotated around its center.
    #[default]
    Box,
}

impl ShapeKind {
    /// Display name given to newly created shapes of this kind.
    pub fn display_name(self) -> &'static str {
        match self {
            ShapeKind::Box => "Box",
        }
    }
}

/// Geometry capabilities provided for every shape kind.
pub trait ShapeUtil {
    /// Axis-aligned bounds of the shape, ignoring its rotation.
    fn bounds(&self, shape: &Shape) -> Rect;

    /// Axis-aligned bounds enclosing the rotated shape.
    fn rotated_bounds(&self, shape: &Shape) -> Rect;

    /// Center of the (unrotated) shape.
    fn center(&self, shape: &Shape) -> Point;
}

/// Get the capability implementation for a shape kind.
pub fn shape_util(kind: ShapeKind) -> &'static dyn ShapeUtil {
    match kind {
        ShapeKind::Box => &BoxUtil,
    }
}

/// A shape on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub name: String,
    /// Id of the containing page.
    pub parent_id: String,
    /// Top-left position in page space.
    pub point: Point,
    pub size: Size,
    /// Rotation in radians around the shape's center.
    #[serde(default)]
    pub rotation: f64,
    /// Ordering index among the page's children.
    pub child_index: usize,
}

impl Shape {
    /// Create a zero-size box at `point`.
    pub fn new_box(parent_id: impl Into<String>, point: Point, child_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ShapeKind::Box,
            name: ShapeKind::Box.display_name().to_string(),
            parent_id: parent_id.into(),
            point,
            size: Size::ZERO,
            rotation: 0.0,
            child_index,
        }
    }

    /// Builder-style size setter.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Builder-style rotation setter.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Copy of this shape under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub fn util(&self) -> &'static dyn ShapeUtil {
        shape_util(self.kind)
    }

    pub fn bounds(&self) -> Rect {
        self.util().bounds(self)
    }

    pub fn rotated_bounds(&self) -> Rect {
        self.util().rotated_bounds(self)
    }

    pub fn center(&self) -> Point {
        self.util().center(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_box_is_zero_sized() {
        let shape = Shape::new_box("page1", Point::new(10.0, 20.0), 3);
        assert_eq!(shape.kind, ShapeKind::Box);
        assert_eq!(shape.name, "Box");
        assert_eq!(shape.parent_id, "page1");
        assert_eq!(shape.size, Size::ZERO);
        assert_eq!(shape.child_index, 3);
        assert!(shape.rotation.abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_changes_only_id() {
        let shape = Shape::new_box("page1", Point::new(1.0, 2.0), 0).with_size(Size::new(5.0, 6.0));
        let copy = shape.duplicate();
        assert_ne!(copy.id, shape.id);
        assert_eq!(copy.point, shape.point);
        assert_eq!(copy.size, shape.size);
        assert_eq!(copy.child_index, shape.child_index);
    }

    #[test]
    fn test_capability_dispatch() {
        let shape = Shape::new_box("page1", Point::new(0.0, 0.0), 0).with_size(Size::new(100.0, 50.0));
        assert_eq!(shape.bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(shape.center(), Point::new(50.0, 25.0));
    }
}
