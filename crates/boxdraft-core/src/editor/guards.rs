//! Guard conditions evaluated before a transition fires.

use super::gesture::Gesture;
use crate::document::Document;
use crate::input::PointerInfo;
use crate::shapes::ShapeId;

/// Whether the pointer has travelled farther than `dead_zone` page units from the press.
pub fn has_left_dead_zone(
    document: &Document,
    gesture: Option<&Gesture>,
    info: &PointerInfo,
    dead_zone: f64,
) -> bool {
    gesture.is_some_and(|gesture| {
        document.page_point(info.point).distance(gesture.initial_point) > dead_zone
    })
}

/// Whether the targeted shape is part of the selection.
pub fn shape_is_selected(document: &Document, info: &PointerInfo) -> bool {
    info.shape_id()
        .is_some_and(|id| document.page_state.is_selected(id))
}

/// Whether the targeted shape is the one most recently added by a shift-click.
pub fn shape_is_pointed(just_shift_selected: Option<ShapeId>, info: &PointerInfo) -> bool {
    info.shape_id().is_some() && info.shape_id() == just_shift_selected
}

pub fn is_pressing_shift(info: &PointerInfo) -> bool {
    info.modifiers.shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerTarget;
    use kurbo::Point;

    #[test]
    fn test_dead_zone_is_strict() {
        let doc = Document::default();
        let gesture = Gesture::new(Point::new(10.0, 10.0), doc.clone(), None);

        let inside = PointerInfo::at(Point::new(13.0, 10.0));
        assert!(!has_left_dead_zone(&doc, Some(&gesture), &inside, 3.0));

        let outside = PointerInfo::at(Point::new(13.1, 10.0));
        assert!(has_left_dead_zone(&doc, Some(&gesture), &outside, 3.0));
    }

    #[test]
    fn test_dead_zone_needs_a_gesture() {
        let doc = Document::default();
        let far = PointerInfo::at(Point::new(500.0, 500.0));
        assert!(!has_left_dead_zone(&doc, None, &far, 3.0));
    }

    #[test]
    fn test_dead_zone_uses_page_space() {
        let mut doc = Document::default();
        doc.page_state.camera.zoom = 2.0;
        let gesture = Gesture::new(Point::ZERO, doc.clone(), None);
        // 5 screen pixels are 2.5 page units at 200%
        let info = PointerInfo::at(Point::new(5.0, 0.0));
        assert!(!has_left_dead_zone(&doc, Some(&gesture), &info, 3.0));
    }

    #[test]
    fn test_shape_is_selected() {
        let mut doc = Document::default();
        let id = ShapeId::new_v4();
        let info = PointerInfo::new(PointerTarget::Shape(id), Point::ZERO);
        assert!(!shape_is_selected(&doc, &info));
        doc.page_state.select(id);
        assert!(shape_is_selected(&doc, &info));
        assert!(!shape_is_selected(&doc, &PointerInfo::at(Point::ZERO)));
    }

    #[test]
    fn test_shape_is_pointed() {
        let id = ShapeId::new_v4();
        let info = PointerInfo::new(PointerTarget::Shape(id), Point::ZERO);
        assert!(shape_is_pointed(Some(id), &info));
        assert!(!shape_is_pointed(None, &info));
        assert!(!shape_is_pointed(None, &PointerInfo::at(Point::ZERO)));
    }

    #[test]
    fn test_is_pressing_shift() {
        assert!(is_pressing_shift(&PointerInfo::at(Point::ZERO).with_shift()));
        assert!(!is_pressing_shift(&PointerInfo::at(Point::ZERO)));
    }
}
