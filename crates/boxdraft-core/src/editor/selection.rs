//! Selection and brush actions.

use super::gesture::Gesture;
use crate::document::{Document, PageState};
use crate::geometry::{bounds_collide, bounds_contain, bounds_from_points};
use crate::input::PointerInfo;
use crate::shapes::ShapeId;

pub(crate) fn clear_selection(document: &mut Document) {
    document.page_state.clear_selection();
}

/// Select `id`, honoring shift-click toggling.
///
/// Without shift the selection becomes exactly `[id]`. With shift, a selected
/// shape is removed unless it is the one `just_shift_selected` marks; anything
/// else is added and becomes the marked shape.
pub(crate) fn select_shape(
    page_state: &mut PageState,
    just_shift_selected: &mut Option<ShapeId>,
    id: ShapeId,
    shift: bool,
) {
    if !shift {
        page_state.select(id);
        return;
    }

    if page_state.is_selected(id) && *just_shift_selected != Some(id) {
        page_state.remove_from_selection(id);
    } else {
        *just_shift_selected = Some(id);
        page_state.add_to_selection(id);
    }
}

/// Stretch the brush from the press to the pointer and select what it hits.
///
/// A shape is hit when the brush contains it, or merely touches it unless
/// meta is held. Shift adds the hits to the selection from the press.
pub(crate) fn update_brush(document: &mut Document, gesture: &Gesture, info: &PointerInfo) {
    let brush = bounds_from_points(&[document.page_point(info.point), gesture.initial_point]);
    let meta = info.modifiers.meta;

    let hits = document
        .page
        .shapes_ordered()
        .filter(|shape| {
            let bounds = shape.bounds();
            bounds_contain(brush, bounds) || (!meta && bounds_collide(brush, bounds))
        })
        .map(|shape| shape.id);

    let selected_ids = if info.modifiers.shift {
        let mut ids = gesture.snapshot.page_state.selected_ids.clone();
        for id in hits {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    } else {
        hits.collect()
    };

    let page_state = &mut document.page_state;
    page_state.brush = Some(brush);
    page_state.selected_ids = selected_ids;
}

pub(crate) fn clear_brush(document: &mut Document) {
    document.page_state.brush = None;
}
