//! Shape creation and deletion.

use super::gesture::Gesture;
use crate::document::Document;
use crate::input::PointerInfo;
use crate::selection::{BoundsHandle, Corner, transformed_bounding_box};
use crate::shapes::Shape;
use kurbo::{Rect, Vec2};

/// Add a zero-size box under the pointer and make it the only selection.
pub(crate) fn create_box_shape(document: &mut Document, info: &PointerInfo) {
    let point = document.page_point(info.point);
    let shape = Shape::new_box(document.page.id.clone(), point, document.page.len());
    let id = shape.id;
    document.page.add_shape(shape);
    document.page_state.select(id);
    log::info!("Created box {id} at ({:.1}, {:.1})", point.x, point.y);
}

/// Resize the box being created so its far corner follows the pointer.
pub(crate) fn update_creating_shape(document: &mut Document, gesture: &Gesture, info: &PointerInfo) {
    let Some(&id) = document.page_state.selected_ids.first() else {
        return;
    };

    let initial = gesture.initial_point;
    let anchor = Rect::from_points(initial, initial + Vec2::new(1.0, 1.0));
    let delta = document.page_point(info.point) - (initial + Vec2::new(1.0, 1.0));
    let next = transformed_bounding_box(
        anchor,
        BoundsHandle::Corner(Corner::BottomRight),
        delta,
        0.0,
        info.modifiers.shift,
    );

    let Some(shape) = document.page.get_shape_mut(id) else {
        log::warn!("Shape being created no longer exists: {id}");
        return;
    };
    shape.point = next.bounds.origin();
    shape.size = next.bounds.size();
}

/// Remove every selected shape, clearing hover if it pointed at one of them.
pub(crate) fn delete_selection(document: &mut Document) {
    let page_state = &mut document.page_state;
    if page_state
        .hovered_id
        .is_some_and(|hovered| page_state.selected_ids.contains(&hovered))
    {
        page_state.hovered_id = None;
    }

    let removed = page_state
        .selected_ids
        .drain(..)
        .filter(|id| document.page.remove_shape(*id).is_some())
        .count();
    if removed > 0 {
        log::info!("Deleted {removed} shape(s)");
    }
}
