//! Scene model and entity/component codec
//!
//! The wire format is an object with an `entities` array; each entity is an
//! object with a single `components` key mapping component tags to field
//! objects. Decode resolves tags through the [`ComponentRegistry`]; encode
//! serializes each instance through its concrete runtime type's metadata.

use crate::component_system::field_access::{FieldAccess, FieldValue};
use crate::component_system::{components_equal, Component, DynComponent};
use crate::inspect::notify::{ChangeEvent, ChangeNotifier, ObserverError, Subscription};
use crate::inspect::write_property;
use crate::io::component_registry::ComponentRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{error, info, warn};

/// Errors that can occur during registry, inspection, and codec operations
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Top-level JSON is malformed or truncated
    #[error("JSON parse error: {0}")]
    ParseFailure(#[from] serde_json::Error),

    /// A wire tag has no registered component type
    #[error("unknown component type: {0}")]
    UnknownComponentType(String),

    /// A component tag was registered twice
    #[error("duplicate component tag: {0}")]
    DuplicateTag(String),

    /// A declared Vector3 field was not a 3-element numeric array
    #[error("malformed vector in '{tag}.{field}': expected a 3-element numeric array")]
    MalformedVector { tag: String, field: String },

    /// Attempted write through a non-writable property node
    #[error("field '{0}' is not writable")]
    ReadOnlyField(String),

    /// A property path segment does not exist on the target schema
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A property write was rejected by the owning instance
    #[error("property write failed: {0}")]
    InvalidWrite(String),

    /// Component-scoped (de)serialization failure
    #[error("component '{tag}': {message}")]
    Component { tag: String, message: String },
}

/// Serialized scene document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDoc {
    /// List of serialized entities with their components
    pub entities: Vec<EntityDoc>,
}

/// A single serialized entity with its components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDoc {
    /// Map of component tags to their serialized JSON values
    pub components: HashMap<String, serde_json::Value>,
}

/// A live component instance plus its change-notification channel
struct ComponentSlot {
    instance: Box<dyn DynComponent>,
    notifier: ChangeNotifier,
}

/// An entity: a tag-keyed bag of component instances.
///
/// At most one instance per tag; insertion order is irrelevant. Edits go
/// through [`Entity::set_field`], which writes the component and fires
/// change notifications at the component level and then the entity level.
#[derive(Default)]
pub struct Entity {
    slots: HashMap<String, ComponentSlot>,
    notifier: ChangeNotifier,
}

impl Entity {
    /// Create an entity with no components
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component instance, keyed by its runtime type's tag.
    ///
    /// Last write wins; the displaced instance, if any, is returned.
    pub fn insert(&mut self, instance: Box<dyn DynComponent>) -> Option<Box<dyn DynComponent>> {
        let tag = instance.tag().to_string();
        self.slots
            .insert(
                tag,
                ComponentSlot {
                    instance,
                    notifier: ChangeNotifier::new(),
                },
            )
            .map(|slot| slot.instance)
    }

    /// Insert a typed component instance
    pub fn insert_component<T>(&mut self, component: T) -> Option<Box<dyn DynComponent>>
    where
        T: Component + FieldAccess + Clone + std::fmt::Debug,
    {
        self.insert(Box::new(component))
    }

    /// Get a typed reference to a component
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.slots
            .get(T::component_name())
            .and_then(|slot| slot.instance.as_any().downcast_ref::<T>())
    }

    /// Get a typed mutable reference to a component.
    ///
    /// Direct mutation bypasses change notification; inspector edits should
    /// go through [`Entity::set_field`] instead.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(T::component_name())
            .and_then(|slot| slot.instance.as_any_mut().downcast_mut::<T>())
    }

    /// Get a dynamic reference to a component by tag
    pub fn component(&self, tag: &str) -> Option<&dyn DynComponent> {
        self.slots.get(tag).map(|slot| slot.instance.as_ref())
    }

    /// Get a dynamic mutable reference to a component by tag.
    ///
    /// Direct mutation bypasses change notification; inspector edits should
    /// go through [`Entity::set_field`] instead.
    pub fn component_mut(&mut self, tag: &str) -> Option<&mut dyn DynComponent> {
        self.slots.get_mut(tag).map(|slot| slot.instance.as_mut())
    }

    /// Remove a component by tag
    pub fn remove(&mut self, tag: &str) -> Option<Box<dyn DynComponent>> {
        self.slots.remove(tag).map(|slot| slot.instance)
    }

    /// Check whether a component with this tag is present
    pub fn contains(&self, tag: &str) -> bool {
        self.slots.contains_key(tag)
    }

    /// Iterate over the tags of all present components
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(|s| s.as_str())
    }

    /// Get the number of components on this entity
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the entity has no components
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Write one field of one component, by dotted path segments.
    ///
    /// On success the component holds the new value before any observer
    /// runs; the component-level notification fires first, then the same
    /// event bubbles to the entity level.
    pub fn set_field(
        &mut self,
        tag: &str,
        path: &[&str],
        value: FieldValue,
    ) -> Result<(), SceneError> {
        let slot = self
            .slots
            .get_mut(tag)
            .ok_or_else(|| SceneError::UnknownComponentType(tag.to_string()))?;

        write_property(
            slot.instance.as_mut(),
            path,
            value.clone(),
            &mut slot.notifier,
        )?;

        self.notifier.notify(&ChangeEvent {
            source: tag.to_string(),
            field: path.join("."),
            value,
        });
        Ok(())
    }

    /// Subscribe to edits on any component of this entity
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&ChangeEvent) -> Result<(), ObserverError> + Send + 'static,
    ) -> Subscription {
        self.notifier.subscribe(observer)
    }

    /// Drop an entity-level subscription
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    /// Subscribe to edits on one component of this entity
    pub fn subscribe_component(
        &mut self,
        tag: &str,
        observer: impl FnMut(&ChangeEvent) -> Result<(), ObserverError> + Send + 'static,
    ) -> Result<Subscription, SceneError> {
        let slot = self
            .slots
            .get_mut(tag)
            .ok_or_else(|| SceneError::UnknownComponentType(tag.to_string()))?;
        Ok(slot.notifier.subscribe(observer))
    }

    /// Drop a component-level subscription
    pub fn unsubscribe_component(&mut self, tag: &str, subscription: Subscription) -> bool {
        self.slots
            .get_mut(tag)
            .is_some_and(|slot| slot.notifier.unsubscribe(subscription))
    }

    /// Decode one entity from its wire form.
    ///
    /// An unknown tag or a malformed component aborts the whole entity; an
    /// empty `components` object yields an entity with zero components.
    pub fn decode(doc: &EntityDoc, registry: &ComponentRegistry) -> Result<Entity, SceneError> {
        let mut entity = Entity::new();
        for (tag, value) in &doc.components {
            let metadata = registry.resolve(tag)?;
            let instance = (metadata.deserializer)(value)?;
            entity.insert(instance);
        }
        Ok(entity)
    }

    /// Encode this entity, serializing each instance through its concrete
    /// runtime type's metadata.
    pub fn encode(&self, registry: &ComponentRegistry) -> Result<EntityDoc, SceneError> {
        let mut components = HashMap::new();
        for slot in self.slots.values() {
            let instance = slot.instance.as_ref();
            let metadata = registry
                .metadata_for_instance(instance)
                .ok_or_else(|| SceneError::UnknownComponentType(instance.tag().to_string()))?;
            let value = (metadata.serializer)(instance.as_any())?;
            components.insert(metadata.name.to_string(), value);
        }
        Ok(EntityDoc { components })
    }

    /// Apply a partial component object onto this entity.
    ///
    /// The payload has the entity wire shape; every component it names is
    /// decoded first and replaces the existing instance only if the whole
    /// patch parses, so a failed patch leaves the entity untouched.
    pub fn patch(&mut self, json: &str, registry: &ComponentRegistry) -> Result<(), SceneError> {
        let doc: EntityDoc = serde_json::from_str(json)?;

        let mut staged = Vec::with_capacity(doc.components.len());
        for (tag, value) in &doc.components {
            let metadata = registry.resolve(tag)?;
            staged.push((metadata.deserializer)(value)?);
        }
        for instance in staged {
            self.insert(instance);
        }
        Ok(())
    }
}

impl Clone for Entity {
    /// Clones component instances; observers are not carried over.
    fn clone(&self) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|(tag, slot)| {
                (
                    tag.clone(),
                    ComponentSlot {
                        instance: slot.instance.clone_boxed(),
                        notifier: ChangeNotifier::new(),
                    },
                )
            })
            .collect();
        Self {
            slots,
            notifier: ChangeNotifier::new(),
        }
    }
}

impl PartialEq for Entity {
    /// Structural equality: same tags, field-for-field equal instances.
    fn eq(&self, other: &Self) -> bool {
        self.slots.len() == other.slots.len()
            && self.slots.iter().all(|(tag, slot)| {
                other
                    .slots
                    .get(tag)
                    .is_some_and(|o| components_equal(slot.instance.as_ref(), o.instance.as_ref()))
            })
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("tags", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The in-memory scene: an ordered sequence of entities.
///
/// A scene is replaced wholesale on every reload; decode builds the complete
/// new scene before the caller swaps it in, so readers never observe a
/// half-built scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub entities: Vec<Entity>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Decode a scene from JSON text.
    ///
    /// Fails only when the top-level JSON is malformed. Entities that fail
    /// to decode are skipped and reported on the diagnostic channel; the
    /// surviving entities keep their document order.
    pub fn decode(json: &str, registry: &ComponentRegistry) -> Result<Scene, SceneError> {
        let doc: SceneDoc = serde_json::from_str(json)?;

        let mut entities = Vec::with_capacity(doc.entities.len());
        for (index, entity_doc) in doc.entities.iter().enumerate() {
            match Entity::decode(entity_doc, registry) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(index = index, error = %e, "Skipping entity that failed to decode");
                }
            }
        }

        info!(entity_count = entities.len(), "Decoded scene");
        Ok(Scene { entities })
    }

    /// Decode a scene, falling back to an empty scene on total failure.
    ///
    /// This is the UI-facing boundary: a bad or truncated engine payload
    /// must never propagate an error past the scene model.
    pub fn decode_or_empty(json: &str, registry: &ComponentRegistry) -> Scene {
        match Self::decode(json, registry) {
            Ok(scene) => scene,
            Err(e) => {
                error!(error = %e, "Scene decode failed, falling back to an empty scene");
                Scene::new()
            }
        }
    }

    /// Encode this scene as pretty-printed JSON
    pub fn encode(&self, registry: &ComponentRegistry) -> Result<String, SceneError> {
        let doc = SceneDoc {
            entities: self
                .entities
                .iter()
                .map(|entity| entity.encode(registry))
                .collect::<Result<_, _>>()?,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}
