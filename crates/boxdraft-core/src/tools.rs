//! Tool system: the active tool and its interaction sub-state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Select,
    Box,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Box => "box",
        }
    }
}

/// Sub-states of the select tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectState {
    #[default]
    Idle,
    PointingCanvas,
    PointingBoundsHandle,
    PointingBounds,
    PointingShape,
    TranslatingSelection,
    TransformingSelection,
    BrushSelecting,
}

impl SelectState {
    pub fn name(self) -> &'static str {
        match self {
            SelectState::Idle => "idle",
            SelectState::PointingCanvas => "pointingCanvas",
            SelectState::PointingBoundsHandle => "pointingBoundsHandle",
            SelectState::PointingBounds => "pointingBounds",
            SelectState::PointingShape => "pointingShape",
            SelectState::TranslatingSelection => "translatingSelection",
            SelectState::TransformingSelection => "transformingSelection",
            SelectState::BrushSelecting => "brushSelecting",
        }
    }
}

/// Sub-states of the box tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoxState {
    #[default]
    Idle,
    Creating,
}

impl BoxState {
    pub fn name(self) -> &'static str {
        match self {
            BoxState::Idle => "idle",
            BoxState::Creating => "creating",
        }
    }
}

/// The active tool together with its sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolState {
    Select(SelectState),
    Box(BoxState),
}

impl Default for ToolState {
    fn default() -> Self {
        ToolState::Select(SelectState::Idle)
    }
}

impl ToolState {
    /// Initial state of a tool.
    pub fn idle(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Select => ToolState::Select(SelectState::Idle),
            ToolKind::Box => ToolState::Box(BoxState::Idle),
        }
    }

    pub fn tool(self) -> ToolKind {
        match self {
            ToolState::Select(_) => ToolKind::Select,
            ToolState::Box(_) => ToolKind::Box,
        }
    }

    pub fn is_idle(self) -> bool {
        matches!(
            self,
            ToolState::Select(SelectState::Idle) | ToolState::Box(BoxState::Idle)
        )
    }
}

impl fmt::Display for ToolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolState::Select(state) => write!(f, "select.{}", state.name()),
            ToolState::Box(state) => write!(f, "box.{}", state.name()),
        }
    }
}
