//! BoxDraft Core Library
//!
//! Document model, geometry and the interaction state machine for the BoxDraft
//! canvas editor. Rendering and input normalization live outside this crate.

pub mod camera;
pub mod config;
pub mod document;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use camera::Camera;
pub use config::{ConfigError, EditorConfig};
pub use document::{Document, Overlays, Page, PageState};
pub use editor::{Editor, Gesture, SnapInfo};
pub use input::{Command, Modifiers, PointerInfo, PointerTarget};
pub use selection::{BoundsHandle, Corner, Edge};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeUtil};
pub use snap::SnapLine;
pub use tools::{BoxState, SelectState, ToolKind, ToolState};
