//! Core model for a scene-editor front-end
//!
//! This crate provides the engine-agnostic heart of an entity editor: a
//! tag-keyed component registry, a JSON scene codec, a schema-driven property
//! tree for inspector panels, and a change-notification channel that carries
//! field edits back into the scene model.

pub mod component_system;
pub mod config;
pub mod inspect;
pub mod io;

// Re-export commonly used types
pub mod prelude {
    // Schema and field access types
    pub use crate::component_system::field_access::{
        FieldAccess, FieldAccessMode, FieldInfo, FieldKind, FieldValue, Schema,
    };
    pub use crate::component_system::{Component, ComponentMetadata, DynComponent};

    // Built-in components
    pub use crate::component_system::components::{
        Camera, ClipPlanes, Material, MeshRenderer, Name, Transform,
    };

    // Scene model and codec types
    pub use crate::io::component_registry::ComponentRegistry;
    pub use crate::io::engine::{EngineBridge, SceneLoader};
    pub use crate::io::scene::{Entity, EntityDoc, Scene, SceneDoc, SceneError};

    // Inspection types
    pub use crate::inspect::notify::{ChangeEvent, ChangeNotifier, Subscription};
    pub use crate::inspect::selection::EntitySelection;
    pub use crate::inspect::{build_property_tree, display_name, write_property, PropertyNode};

    // Config types
    pub use crate::config::EditorConfig;

    // Math types
    pub use glam::Vec3;
}

/// Initialize logging for the editor core
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
