//! Component registry for tag-based component resolution
//!
//! Maps wire tags to component metadata during decode, and component
//! TypeIds back to metadata during encode. The registry is built once at
//! start-up and passed explicitly to the codec; it is never mutated after
//! registration.

use crate::component_system::components::register_default_components;
use crate::component_system::{ComponentMetadata, DynComponent};
use crate::io::scene::SceneError;
use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
pub struct ComponentRegistry {
    /// Maps TypeId to component metadata
    metadata: HashMap<TypeId, ComponentMetadata>,
    /// Maps component tags to TypeId for decode-time lookup
    tag_to_type: HashMap<String, TypeId>,
}

impl ComponentRegistry {
    /// Create a new empty component registry
    pub fn new() -> Self {
        Self {
            metadata: HashMap::new(),
            tag_to_type: HashMap::new(),
        }
    }

    /// Register a component type.
    ///
    /// Fails with [`SceneError::DuplicateTag`] if the tag is already taken;
    /// registration happens once per concrete type at process start, so a
    /// duplicate is a registration bug.
    pub fn register_with_metadata(&mut self, metadata: ComponentMetadata) -> Result<(), SceneError> {
        let name = metadata.name;
        if self.tag_to_type.contains_key(name) {
            return Err(SceneError::DuplicateTag(name.to_string()));
        }

        self.tag_to_type.insert(name.to_string(), metadata.type_id);
        self.metadata.insert(metadata.type_id, metadata);

        debug!(tag = name, "Registered component type");
        Ok(())
    }

    /// Resolve a wire tag to its component metadata.
    ///
    /// Used during decode to turn a JSON object key into a concrete schema;
    /// fails with [`SceneError::UnknownComponentType`] for unregistered tags.
    pub fn resolve(&self, tag: &str) -> Result<&ComponentMetadata, SceneError> {
        self.tag_to_type
            .get(tag)
            .and_then(|type_id| self.metadata.get(type_id))
            .ok_or_else(|| SceneError::UnknownComponentType(tag.to_string()))
    }

    /// Look up metadata by an instance's concrete runtime type.
    ///
    /// Encode goes through this lookup, so an instance's dynamic type always
    /// determines its wire shape.
    pub fn metadata_for_instance(&self, instance: &dyn DynComponent) -> Option<&ComponentMetadata> {
        self.metadata.get(&instance.as_any().type_id())
    }

    /// Check if a component tag is registered
    pub fn is_registered(&self, tag: &str) -> bool {
        self.tag_to_type.contains_key(tag)
    }

    /// Get all registered component tags
    pub fn registered_tags(&self) -> impl Iterator<Item = &str> {
        self.tag_to_type.keys().map(|s| s.as_str())
    }

    /// Iterate over all registered component metadata
    pub fn iter_metadata(&self) -> impl Iterator<Item = &ComponentMetadata> {
        self.metadata.values()
    }

    /// Get the number of registered component types
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Create a registry with the built-in component set registered.
    ///
    /// The built-in tags are unique by construction, so failure here means a
    /// registration bug and aborts immediately.
    pub fn with_default_components() -> Self {
        let mut registry = Self::new();
        if let Err(e) = register_default_components(&mut registry) {
            panic!("built-in component registration failed: {e}");
        }

        debug!(
            component_count = registry.len(),
            "Created registry with default components"
        );

        registry
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field(
                "registered_tags",
                &self.tag_to_type.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
