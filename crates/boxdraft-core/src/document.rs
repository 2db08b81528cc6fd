//! Document model: the page with its shapes, per-page view state and overlays.

use crate::camera::Camera;
use crate::geometry::{common_bounds, rotate_with};
use crate::shapes::{Shape, ShapeId};
use crate::snap::SnapLine;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id of the page created by [`Document::default`].
pub const DEFAULT_PAGE_ID: &str = "page1";

/// A page containing shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    /// All shapes on the page, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl Page {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add a shape on top of the others. A shape with the same id is replaced in place.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id;
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Combined bounds of every shape.
    pub fn bounds(&self) -> Option<Rect> {
        common_bounds(self.shapes_ordered().map(Shape::bounds))
    }

    /// Shapes under a page point, topmost first. Rotation is taken into account.
    pub fn shapes_at_point(&self, point: Point) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|id| self.shapes.get(id))
            .filter(|shape| {
                let local = rotate_with(point, shape.center(), -shape.rotation);
                shape.bounds().contains(local)
            })
            .map(|shape| shape.id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_ID)
    }
}

/// Transient view and interaction state of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    /// Id of the page this state belongs to.
    pub id: String,
    pub camera: Camera,
    /// Selected shape ids in selection order, without duplicates.
    pub selected_ids: Vec<ShapeId>,
    #[serde(default)]
    pub hovered_id: Option<ShapeId>,
    /// Marquee rectangle, only present while brush selecting.
    #[serde(default)]
    pub brush: Option<Rect>,
}

impl PageState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected_ids.contains(&id)
    }

    /// Replace the selection with a single shape.
    pub fn select(&mut self, id: ShapeId) {
        self.selected_ids.clear();
        self.selected_ids.push(id);
    }

    /// Add a shape to the selection unless it is already selected.
    pub fn add_to_selection(&mut self, id: ShapeId) {
        if !self.is_selected(id) {
            self.selected_ids.push(id);
        }
    }

    pub fn remove_from_selection(&mut self, id: ShapeId) {
        self.selected_ids.retain(|&selected| selected != id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }
}

/// Transient visual aids drawn over the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlays {
    pub snap_lines: Vec<SnapLine>,
}

/// The editable document: one page, its view state and overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub page: Page,
    pub page_state: PageState,
    #[serde(default)]
    pub overlays: Overlays,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            page: Page::new(DEFAULT_PAGE_ID),
            page_state: PageState::new(DEFAULT_PAGE_ID),
            overlays: Overlays::default(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected shapes in selection order. Unknown ids are skipped.
    pub fn selected_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.page_state
            .selected_ids
            .iter()
            .filter_map(|id| self.page.get_shape(*id))
    }

    /// Combined bounds of the selected shapes, if any are selected.
    pub fn selection_bounds(&self) -> Option<Rect> {
        common_bounds(self.selected_shapes().map(Shape::bounds))
    }

    /// Convert a screen point to page space through the current camera.
    pub fn page_point(&self, screen_point: Point) -> Point {
        self.page_state.camera.screen_to_page(screen_point)
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
