//! Headless replay of editor command scripts.
//!
//! A script is a JSON file holding an optional starting document, an optional
//! viewport size and the list of commands to feed the editor in order.

use boxdraft_core::{Command, ConfigError, Document, Editor, EditorConfig};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script parse error: {0}")]
    Parse(serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Serialization error: {0}")]
    Serialize(serde_json::Error),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// A recorded interaction session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Width and height of the render surface in screen units.
    pub viewport: Option<[f64; 2]>,
    /// Document to start from; an empty page when absent.
    pub document: Option<Document>,
    pub commands: Vec<Command>,
}

impl Script {
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        serde_json::from_str(json).map_err(ReplayError::Parse)
    }
}

/// Read a script from disk.
pub fn load_script(path: &Path) -> ReplayResult<Script> {
    let json = std::fs::read_to_string(path)?;
    Script::from_json(&json)
}

/// Read and validate an editor config from disk.
pub fn load_config(path: &Path) -> ReplayResult<EditorConfig> {
    let json = std::fs::read_to_string(path)?;
    Ok(EditorConfig::from_json(&json)?)
}

/// Run every command of `script` through a fresh editor.
///
/// Fails only when `config` does not validate; dispatching commands cannot fail.
pub fn replay(script: Script, config: EditorConfig) -> ReplayResult<Editor> {
    let document = script.document.unwrap_or_default();
    let mut editor = Editor::with_document(document).with_config(config)?;
    if let Some([width, height]) = script.viewport {
        editor.set_viewport(Rect::new(0.0, 0.0, width, height));
    }

    log::info!("Replaying {} command(s)", script.commands.len());
    for command in script.commands {
        editor.dispatch(command);
    }
    log::debug!("Replay finished in {}", editor.state());
    Ok(editor)
}

/// Serialize a replayed document.
pub fn document_json(document: &Document) -> ReplayResult<String> {
    document.to_json().map_err(ReplayError::Serialize)
}
