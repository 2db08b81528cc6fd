//! Per-gesture context, alive from a press until its release or cancellation.

use crate::document::Document;
use crate::geometry::{BoundsWithCenter, common_bounds};
use crate::selection::BoundsHandle;
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;

/// Cached bounds used for snapping while a drag is in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapInfo {
    /// Combined bounds of the selection when the drag started.
    pub initial_bounds: BoundsWithCenter,
    /// Rotated bounds of every shape.
    pub all: Vec<BoundsWithCenter>,
    /// Rotated bounds of every shape outside the selection.
    pub others: Vec<BoundsWithCenter>,
}

impl SnapInfo {
    /// Compute snap bounds for the current selection, or `None` when nothing is selected.
    pub fn from_document(document: &Document) -> Option<Self> {
        let initial = common_bounds(document.selected_shapes().map(Shape::bounds))?;

        let mut all = Vec::with_capacity(document.page.len());
        let mut others = Vec::new();
        for shape in document.page.shapes_ordered() {
            let bounds = BoundsWithCenter::new(shape.rotated_bounds());
            all.push(bounds);
            if !document.page_state.is_selected(shape.id) {
                others.push(bounds);
            }
        }

        Some(Self {
            initial_bounds: BoundsWithCenter::new(initial),
            all,
            others,
        })
    }
}

/// State of one pointer gesture.
#[derive(Debug, Clone)]
pub struct Gesture {
    /// Page-space position of the press.
    pub initial_point: Point,
    /// Document as it was when the press started.
    pub snapshot: Document,
    /// Whether an alt-drag currently has clones in place of the selection.
    pub is_cloning: bool,
    /// Clones created by the alt-drag, at their starting positions.
    pub clones: Vec<Shape>,
    pub snap_info: Option<SnapInfo>,
    /// Handle grabbed for a transform.
    pub bounds_handle: Option<BoundsHandle>,
}

impl Gesture {
    pub fn new(initial_point: Point, snapshot: Document, bounds_handle: Option<BoundsHandle>) -> Self {
        Self {
            initial_point,
            snapshot,
            is_cloning: false,
            clones: Vec::new(),
            snap_info: None,
            bounds_handle,
        }
    }

    /// A shape as it was when it started moving: from the snapshot, or from the clone set.
    pub fn initial_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.snapshot
            .page
            .get_shape(id)
            .or_else(|| self.clones.iter().find(|clone| clone.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};

    fn doc_with_two_boxes() -> (Document, ShapeId, ShapeId) {
        let mut doc = Document::default();
        let a = Shape::new_box("page1", Point::new(0.0, 0.0), 0).with_size(Size::new(10.0, 10.0));
        let b = Shape::new_box("page1", Point::new(50.0, 0.0), 1).with_size(Size::new(10.0, 10.0));
        let (a_id, b_id) = (a.id, b.id);
        doc.page.add_shape(a);
        doc.page.add_shape(b);
        (doc, a_id, b_id)
    }

    #[test]
    fn test_snap_info_splits_selection() {
        let (mut doc, a_id, _) = doc_with_two_boxes();
        assert!(SnapInfo::from_document(&doc).is_none());

        doc.page_state.select(a_id);
        let info = SnapInfo::from_document(&doc).unwrap();
        assert_eq!(info.initial_bounds.bounds, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(info.all.len(), 2);
        assert_eq!(info.others.len(), 1);
        assert_eq!(info.others[0].bounds, Rect::new(50.0, 0.0, 60.0, 10.0));
    }

    #[test]
    fn test_initial_shape_falls_back_to_clones() {
        let (doc, a_id, _) = doc_with_two_boxes();
        let mut gesture = Gesture::new(Point::ZERO, doc, None);
        let clone = gesture.snapshot.page.get_shape(a_id).unwrap().duplicate();
        let clone_id = clone.id;
        gesture.clones.push(clone);

        assert!(gesture.initial_shape(a_id).is_some());
        assert_eq!(gesture.initial_shape(clone_id).map(|s| s.id), Some(clone_id));
        assert!(gesture.initial_shape(ShapeId::new_v4()).is_none());
    }
}
