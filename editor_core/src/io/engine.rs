//! Engine payload boundary
//!
//! The running engine exposes the current scene as a JSON payload written
//! into a caller-provided byte buffer. [`SceneLoader`] owns that buffer and
//! turns payloads into [`Scene`] values; a payload that does not fit or is
//! not valid UTF-8 degrades to an empty scene rather than an error.

use crate::config::EditorConfig;
use crate::io::component_registry::ComponentRegistry;
use crate::io::scene::Scene;
use std::path::Path;
use tracing::{debug, error, info};

/// Interface to a running engine instance.
///
/// `serialize_scene` writes the current scene JSON into `buf` and returns
/// the number of bytes it claims to have written; a full buffer means the
/// payload was truncated.
pub trait EngineBridge {
    fn serialize_scene(&mut self, buf: &mut [u8]) -> usize;

    fn open_project(&mut self, path: &Path);
}

/// Pulls scene snapshots out of an engine through a fixed-capacity buffer
pub struct SceneLoader<B: EngineBridge> {
    bridge: B,
    buffer: Vec<u8>,
}

impl<B: EngineBridge> SceneLoader<B> {
    pub fn new(bridge: B, config: &EditorConfig) -> Self {
        Self {
            bridge,
            buffer: vec![0; config.scene_buffer_capacity],
        }
    }

    /// Point the engine at a project directory
    pub fn open_project(&mut self, path: &Path) {
        info!(path = %path.display(), "Opening project");
        self.bridge.open_project(path);
    }

    /// Fetch and decode the engine's current scene.
    ///
    /// Never fails: a truncated, non-UTF-8, or malformed payload yields an
    /// empty scene and a diagnostic.
    pub fn load_current_scene(&mut self, registry: &ComponentRegistry) -> Scene {
        let written = self.bridge.serialize_scene(&mut self.buffer);
        let written = written.min(self.buffer.len());

        let json = match std::str::from_utf8(&self.buffer[..written]) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Engine scene payload is not valid UTF-8");
                return Scene::new();
            }
        };

        debug!(bytes = written, "Received scene payload from engine");
        Scene::decode_or_empty(json, registry)
    }

    /// Access the underlying bridge
    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }
}
