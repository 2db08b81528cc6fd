//! Resizing and rotating the selection from a grabbed bounds handle.

use super::gesture::Gesture;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::geometry::{angle_between, common_bounds, rotate_with};
use crate::input::PointerInfo;
use crate::selection::{BoundsHandle, relative_transformed_bounding_box, transformed_bounding_box};
use crate::shapes::{Shape, ShapeId};
use crate::snap::snap_angle_to_segments;
use kurbo::{Point, Rect, Vec2};

/// Resize or rotate the selection relative to its bounds at the press.
pub(crate) fn transform_selection(
    document: &mut Document,
    gesture: &Gesture,
    info: &PointerInfo,
    config: &EditorConfig,
) {
    let Some(handle) = gesture.bounds_handle else {
        log::warn!("Transform without a grabbed handle");
        return;
    };

    let selected: Vec<(ShapeId, &Shape)> = document
        .page_state
        .selected_ids
        .iter()
        .filter_map(|id| match gesture.snapshot.page.get_shape(*id) {
            Some(shape) => Some((*id, shape)),
            None => {
                log::warn!("Selected shape missing from snapshot: {id}");
                None
            }
        })
        .collect();
    let Some(initial_bounds) = common_bounds(selected.iter().map(|(_, shape)| shape.bounds())) else {
        return;
    };

    let point = document.page_point(info.point);
    let shift = info.modifiers.shift;

    if handle.is_rotate() {
        let segments = config.rotation_segments;
        rotate(document, &selected, initial_bounds, gesture.initial_point, point, shift, segments);
    } else {
        let delta = point - gesture.initial_point;
        resize(document, &selected, initial_bounds, handle, delta, shift);
    }
}

fn rotate(
    document: &mut Document,
    selected: &[(ShapeId, &Shape)],
    initial_bounds: Rect,
    initial_point: Point,
    point: Point,
    shift: bool,
    segments: u32,
) {
    let common_center = initial_bounds.center();
    let mut angle_delta =
        angle_between(common_center, point) - angle_between(common_center, initial_point);
    if shift {
        angle_delta = snap_angle_to_segments(angle_delta, segments);
    }

    for (id, initial) in selected {
        // Snap the shape's own rotation onto the grid too
        let correction = if shift {
            snap_angle_to_segments(initial.rotation, segments) - initial.rotation
        } else {
            0.0
        };

        let center = initial.center();
        let relative_center = center - initial.point;
        let rotated_center = rotate_with(center, common_center, angle_delta);

        if let Some(shape) = document.page.get_shape_mut(*id) {
            shape.point = rotated_center - relative_center;
            shape.rotation = initial.rotation + angle_delta + correction;
        }
    }
}

fn resize(
    document: &mut Document,
    selected: &[(ShapeId, &Shape)],
    initial_bounds: Rect,
    handle: BoundsHandle,
    delta: Vec2,
    shift: bool,
) {
    let rotation = match selected {
        [(_, only)] => only.rotation,
        _ => 0.0,
    };
    let next = transformed_bounding_box(initial_bounds, handle, delta, rotation, shift);

    for (id, initial) in selected {
        let bounds = relative_transformed_bounding_box(
            next.bounds,
            initial_bounds,
            initial.bounds(),
            next.scale_x < 0.0,
            next.scale_y < 0.0,
        );
        if let Some(shape) = document.page.get_shape_mut(*id) {
            shape.point = bounds.origin();
            shape.size = bounds.size();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Corner, Edge};
    use kurbo::Size;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn setup(handle: BoundsHandle, shapes: &[(Point, Size)]) -> (Document, Gesture, Vec<ShapeId>) {
        let mut doc = Document::default();
        let mut ids = Vec::new();
        for (i, (point, size)) in shapes.iter().enumerate() {
            let shape = Shape::new_box("page1", *point, i).with_size(*size);
            ids.push(shape.id);
            doc.page.add_shape(shape);
            doc.page_state.add_to_selection(ids[i]);
        }
        (doc.clone(), Gesture::new(Point::ZERO, doc, Some(handle)), ids)
    }

    fn drag(doc: &mut Document, gesture: &mut Gesture, from: Point, to: PointerInfo) {
        gesture.initial_point = from;
        transform_selection(doc, gesture, &to, &EditorConfig::default());
    }

    #[test]
    fn test_resize_group_proportionally() {
        let handle = BoundsHandle::Corner(Corner::BottomRight);
        let shapes = [
            (Point::new(0.0, 0.0), Size::new(50.0, 50.0)),
            (Point::new(50.0, 50.0), Size::new(50.0, 50.0)),
        ];
        let (mut doc, mut gesture, ids) = setup(handle, &shapes);
        drag(&mut doc, &mut gesture, Point::new(100.0, 100.0), PointerInfo::at(Point::new(200.0, 150.0)));

        let second = doc.page.get_shape(ids[1]).unwrap();
        assert_eq!(second.point, Point::new(100.0, 75.0));
        assert_eq!(second.size, Size::new(100.0, 75.0));
    }

    #[test]
    fn test_resize_past_opposite_corner_mirrors() {
        let handle = BoundsHandle::Corner(Corner::BottomRight);
        let shapes = [
            (Point::new(0.0, 0.0), Size::new(25.0, 100.0)),
            (Point::new(75.0, 0.0), Size::new(25.0, 100.0)),
        ];
        let (mut doc, mut gesture, ids) = setup(handle, &shapes);
        drag(&mut doc, &mut gesture, Point::new(100.0, 100.0), PointerInfo::at(Point::new(-100.0, 100.0)));

        // Box now spans -100..0; the left shape lands on the right side
        let left = doc.page.get_shape(ids[0]).unwrap();
        assert!((left.point.x + 25.0).abs() < EPS);
        assert!((left.size.width - 25.0).abs() < EPS);
        let right = doc.page.get_shape(ids[1]).unwrap();
        assert!((right.point.x + 100.0).abs() < EPS);
        assert!(right.size.width > 0.0 && right.size.height > 0.0);
    }

    #[test]
    fn test_edge_resize_with_shift_keeps_ratio() {
        let handle = BoundsHandle::Edge(Edge::Right);
        let (mut doc, mut gesture, ids) = setup(handle, &[(Point::ZERO, Size::new(100.0, 50.0))]);
        let info = PointerInfo::at(Point::new(200.0, 25.0)).with_shift();
        drag(&mut doc, &mut gesture, Point::new(100.0, 25.0), info);

        let shape = doc.page.get_shape(ids[0]).unwrap();
        assert!((shape.size.width - 200.0).abs() < EPS);
        assert!((shape.size.height - 100.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_about_common_center() {
        let shapes = [
            (Point::new(0.0, 0.0), Size::new(20.0, 20.0)),
            (Point::new(80.0, 0.0), Size::new(20.0, 20.0)),
        ];
        let (mut doc, mut gesture, ids) = setup(BoundsHandle::Rotate, &shapes);
        // Common center is (50, 10); drag from its right to below it
        drag(&mut doc, &mut gesture, Point::new(100.0, 10.0), PointerInfo::at(Point::new(50.0, 60.0)));

        let right = doc.page.get_shape(ids[1]).unwrap();
        assert!((right.rotation - FRAC_PI_2).abs() < EPS);
        // Its center (90, 10) swings to (50, 50)
        assert!((right.center().x - 50.0).abs() < EPS);
        assert!((right.center().y - 50.0).abs() < EPS);
        assert_eq!(right.size, Size::new(20.0, 20.0));
    }

    #[test]
    fn test_rotate_with_shift_snaps() {
        let (mut doc, mut gesture, ids) =
            setup(BoundsHandle::Rotate, &[(Point::ZERO, Size::new(20.0, 20.0))]);
        doc.page.get_shape_mut(ids[0]).unwrap().rotation = 0.1;
        gesture.snapshot = doc.clone();

        // About 40 degrees around the center (10, 10)
        let angle = 40.0_f64.to_radians();
        let to = Point::new(10.0 + 50.0 * angle.cos(), 10.0 + 50.0 * angle.sin());
        drag(&mut doc, &mut gesture, Point::new(60.0, 10.0), PointerInfo::at(to).with_shift());

        // 45 degrees from the delta, plus the shape's own 0.1 snapped back to 0
        let shape = doc.page.get_shape(ids[0]).unwrap();
        assert!((shape.rotation - PI / 4.0).abs() < EPS);
    }

    #[test]
    fn test_transform_without_handle_is_noop() {
        let (mut doc, mut gesture, _) =
            setup(BoundsHandle::Rotate, &[(Point::ZERO, Size::new(20.0, 20.0))]);
        gesture.bounds_handle = None;
        let before = doc.clone();
        drag(&mut doc, &mut gesture, Point::ZERO, PointerInfo::at(Point::new(50.0, 50.0)));
        assert_eq!(doc, before);
    }
}
