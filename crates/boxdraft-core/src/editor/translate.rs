//! Drag-moving the selection, with alt-cloning and snapping.

use super::gesture::Gesture;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::geometry::{
    BoundsWithCenter, bounds_collide, bounds_contain, lock_to_dominant_axis, translate_bounds,
};
use crate::input::PointerInfo;
use crate::shapes::ShapeId;
use crate::snap::{SnapLine, snap_bounds};
use kurbo::{Rect, Vec2};

/// Move the selection to follow the pointer from the press point.
pub(crate) fn translate_selection(
    document: &mut Document,
    gesture: &mut Gesture,
    info: &PointerInfo,
    config: &EditorConfig,
    viewport: Rect,
) {
    let mut delta = document.page_point(info.point) - gesture.initial_point;
    if info.modifiers.shift {
        delta = lock_to_dominant_axis(delta);
    }

    if info.modifiers.alt && !gesture.is_cloning {
        start_cloning(document, gesture);
    } else if !info.modifiers.alt && gesture.is_cloning {
        stop_cloning(document, gesture);
    }

    let mut snap_lines: Vec<SnapLine> = Vec::new();
    let zoom = document.page_state.camera.zoom;
    let speed = info.delta.hypot2() / zoom;
    if let Some(snap_info) = &gesture.snap_info {
        if !info.modifiers.meta && speed < config.snap_speed_threshold {
            let moving = BoundsWithCenter::new(translate_bounds(snap_info.initial_bounds.bounds, delta));
            let visible = document.page_state.camera.viewport_in_page(viewport);
            let candidates = if gesture.is_cloning {
                &snap_info.all
            } else {
                &snap_info.others
            };
            let candidates: Vec<BoundsWithCenter> = candidates
                .iter()
                .filter(|b| bounds_contain(visible, b.bounds) || bounds_collide(visible, b.bounds))
                .copied()
                .collect();

            if let Some(result) = snap_bounds(&moving, &candidates, config.snap_distance / zoom) {
                snap_lines = result.lines;
                delta -= result.offset;
            }
        }
    }
    document.overlays.snap_lines = snap_lines;

    move_selection(document, gesture, delta);
}

/// Put every selected shape at its starting position plus `delta`.
fn move_selection(document: &mut Document, gesture: &Gesture, delta: Vec2) {
    for id in &document.page_state.selected_ids {
        let Some(initial) = gesture.initial_shape(*id) else {
            log::warn!("Selected shape has no starting position: {id}");
            continue;
        };
        if let Some(shape) = document.page.get_shape_mut(*id) {
            shape.point = initial.point + delta;
        }
    }
}

/// Swap the selection for duplicates, leaving the originals where they started.
fn start_cloning(document: &mut Document, gesture: &mut Gesture) {
    gesture.is_cloning = true;

    let mut clone_ids: Vec<ShapeId> = Vec::with_capacity(document.page_state.selected_ids.len());
    for id in &document.page_state.selected_ids {
        let Some(initial) = gesture.snapshot.page.get_shape(*id) else {
            log::warn!("Cannot clone shape missing from snapshot: {id}");
            continue;
        };
        if let Some(shape) = document.page.get_shape_mut(*id) {
            shape.point = initial.point;
        }

        let clone = initial.duplicate();
        clone_ids.push(clone.id);
        document.page.add_shape(clone.clone());
        gesture.clones.push(clone);
    }

    log::debug!("Cloned {} shape(s)", clone_ids.len());
    document.page_state.selected_ids = clone_ids;
}

/// Drop the clones and restore the selection from the press.
fn stop_cloning(document: &mut Document, gesture: &mut Gesture) {
    gesture.is_cloning = false;

    for clone in gesture.clones.drain(..) {
        document.page.remove_shape(clone.id);
    }
    document.page_state.selected_ids = gesture.snapshot.page_state.selected_ids.clone();
    log::debug!("Removed clones");
}
