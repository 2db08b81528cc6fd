//! Commands accepted by the editor and the pointer payload they carry.

use crate::selection::BoundsHandle;
use crate::shapes::ShapeId;
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

/// What a pointer event landed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// Empty canvas.
    #[default]
    Canvas,
    Shape(ShapeId),
    /// Inside the selection bounds, away from any handle.
    Bounds,
    Handle(BoundsHandle),
}

/// Pointer state attached to a command. Positions are in screen space.
///
/// When deserialized without an `origin`, the press is taken to start at `point`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointerInfoRepr")]
pub struct PointerInfo {
    pub target: PointerTarget,
    /// Current pointer position.
    pub point: Point,
    /// Position where the current press started.
    pub origin: Point,
    /// Movement since the previous event.
    pub delta: Vec2,
    pub modifiers: Modifiers,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PointerInfoRepr {
    target: PointerTarget,
    point: Point,
    origin: Option<Point>,
    delta: Vec2,
    modifiers: Modifiers,
}

impl From<PointerInfoRepr> for PointerInfo {
    fn from(repr: PointerInfoRepr) -> Self {
        Self {
            target: repr.target,
            point: repr.point,
            origin: repr.origin.unwrap_or(repr.point),
            delta: repr.delta,
            modifiers: repr.modifiers,
        }
    }
}

impl PointerInfo {
    /// A pointer at `point` whose press also started there.
    pub fn new(target: PointerTarget, point: Point) -> Self {
        Self {
            target,
            point,
            origin: point,
            ..Self::default()
        }
    }

    pub fn at(point: Point) -> Self {
        Self::new(PointerTarget::Canvas, point)
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    /// The targeted shape, when the pointer is over one.
    pub fn shape_id(&self) -> Option<ShapeId> {
        match self.target {
            PointerTarget::Shape(id) => Some(id),
            _ => None,
        }
    }

    pub fn handle(&self) -> Option<BoundsHandle> {
        match self.target {
            PointerTarget::Handle(handle) => Some(handle),
            _ => None,
        }
    }
}

/// A named input event for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    SelectedTool { tool: ToolKind },
    /// A press began. Sent after the target-specific pointed command.
    StartedPointing(PointerInfo),
    Panned(PointerInfo),
    /// Pan by the info's delta and zoom to `zoom` around the pointer.
    Pinched { info: PointerInfo, zoom: f64 },
    ZoomedToSelection,
    ZoomedToFit,
    ZoomedIn,
    ZoomedOut,
    Cancelled,
    Deleted,
    PointedCanvas(PointerInfo),
    PointedShape(PointerInfo),
    PointedBounds(PointerInfo),
    PointedBoundsHandle(PointerInfo),
    MovedPointer(PointerInfo),
    StoppedPointing(PointerInfo),
    ToggledModifier(PointerInfo),
}

impl Command {
    /// Short event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectedTool { .. } => "selected_tool",
            Command::StartedPointing(_) => "started_pointing",
            Command::Panned(_) => "panned",
            Command::Pinched { .. } => "pinched",
            Command::ZoomedToSelection => "zoomed_to_selection",
            Command::ZoomedToFit => "zoomed_to_fit",
            Command::ZoomedIn => "zoomed_in",
            Command::ZoomedOut => "zoomed_out",
            Command::Cancelled => "cancelled",
            Command::Deleted => "deleted",
            Command::PointedCanvas(_) => "pointed_canvas",
            Command::PointedShape(_) => "pointed_shape",
            Command::PointedBounds(_) => "pointed_bounds",
            Command::PointedBoundsHandle(_) => "pointed_bounds_handle",
            Command::MovedPointer(_) => "moved_pointer",
            Command::StoppedPointing(_) => "stopped_pointing",
            Command::ToggledModifier(_) => "toggled_modifier",
        }
    }

    /// The pointer payload, for commands that carry one.
    pub fn info(&self) -> Option<&PointerInfo> {
        match self {
            Command::StartedPointing(info)
            | Command::Panned(info)
            | Command::Pinched { info, .. }
            | Command::PointedCanvas(info)
            | Command::PointedShape(info)
            | Command::PointedBounds(info)
            | Command::PointedBoundsHandle(info)
            | Command::MovedPointer(info)
            | Command::StoppedPointing(info)
            | Command::ToggledModifier(info) => Some(info),
            _ => None,
        }
    }

    /// The pointed command matching the info's target.
    pub fn pointed(info: PointerInfo) -> Self {
        match info.target {
            PointerTarget::Canvas => Command::PointedCanvas(info),
            PointerTarget::Shape(_) => Command::PointedShape(info),
            PointerTarget::Bounds => Command::PointedBounds(info),
            PointerTarget::Handle(_) => Command::PointedBoundsHandle(info),
        }
    }
}
