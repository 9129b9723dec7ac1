//! Configuration types for the editor core

use tracing::debug;

/// Tunables for the scene hand-off and the inspector.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Capacity of the text buffer handed to the engine when it serializes
    /// the current scene. Payloads larger than this are truncated by the
    /// engine and rejected as a parse failure on our side.
    pub scene_buffer_capacity: usize,
    /// Bound on property-tree nesting when expanding composite fields.
    pub inspector_max_depth: usize,
}

impl EditorConfig {
    /// Create a config with custom limits
    pub fn new(scene_buffer_capacity: usize, inspector_max_depth: usize) -> Self {
        debug!(
            scene_buffer_capacity = scene_buffer_capacity,
            inspector_max_depth = inspector_max_depth,
            "Creating new EditorConfig"
        );
        Self {
            scene_buffer_capacity,
            inspector_max_depth,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            scene_buffer_capacity: 4096,
            inspector_max_depth: crate::inspect::DEFAULT_MAX_DEPTH,
        }
    }
}
