//! Scene I/O: registry, wire codec, and the engine payload boundary

pub mod component_registry;
pub mod engine;
pub mod scene;

pub use component_registry::ComponentRegistry;
pub use engine::{EngineBridge, SceneLoader};
pub use scene::{Entity, EntityDoc, Scene, SceneDoc, SceneError};
