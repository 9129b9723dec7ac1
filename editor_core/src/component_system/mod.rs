//! Component system with explicit schemas and registry-driven serialization

use crate::io::component_registry::ComponentRegistry;
use crate::io::scene::SceneError;
use serde::{de::DeserializeOwned, Serialize};
use std::any::{Any, TypeId};
use std::sync::Arc;

pub mod components;
pub mod field_access;

#[cfg(test)]
mod tests;

use field_access::{FieldAccess, Schema};

/// Type alias for component serializer function
pub type SerializerFn =
    Arc<dyn Fn(&dyn Any) -> Result<serde_json::Value, SceneError> + Send + Sync>;

/// Type alias for component deserializer function
pub type DeserializerFn =
    Arc<dyn Fn(&serde_json::Value) -> Result<Box<dyn DynComponent>, SceneError> + Send + Sync>;

/// Type alias for default-instance constructor function
pub type MakeDefaultFn = Arc<dyn Fn() -> Box<dyn DynComponent> + Send + Sync>;

/// Trait for types that can live in an entity's component bag.
pub trait Component: Any + Send + Sync + 'static {
    /// The registry tag of this component type
    fn component_name() -> &'static str
    where
        Self: Sized;

    /// The declared field schema of this component type
    fn schema() -> &'static Schema
    where
        Self: Sized;

    /// Register this component type with the registry
    fn register(registry: &mut ComponentRegistry) -> Result<(), SceneError>
    where
        Self: Sized;
}

/// Object-safe runtime view of a component instance.
///
/// The blanket impl covers every `Component` that also declares field access
/// and is clonable, so concrete component types never implement this by hand.
pub trait DynComponent: FieldAccess + std::fmt::Debug + Send + Sync + 'static {
    /// Tag of the instance's concrete runtime type
    fn tag(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn clone_boxed(&self) -> Box<dyn DynComponent>;
}

impl<T> DynComponent for T
where
    T: Component + FieldAccess + Clone + std::fmt::Debug,
{
    fn tag(&self) -> &'static str {
        T::component_name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn DynComponent> {
        Box::new(self.clone())
    }
}

/// Structural equality over two component instances: same concrete tag and
/// field-for-field equal values.
pub fn components_equal(a: &dyn DynComponent, b: &dyn DynComponent) -> bool {
    if a.tag() != b.tag() {
        return false;
    }
    a.schema()
        .fields
        .iter()
        .all(|field| a.get_field(field.name) == b.get_field(field.name))
}

/// Metadata for a component type including schema and codec functions
pub struct ComponentMetadata {
    /// Registry tag of the component
    pub name: &'static str,

    /// The TypeId of the component, used to serialize by runtime identity
    pub type_id: TypeId,

    /// Declared field schema
    pub schema: &'static Schema,

    /// Function to serialize an instance to JSON
    pub serializer: SerializerFn,

    /// Function to deserialize an instance from JSON
    pub deserializer: DeserializerFn,

    /// Function to build a default instance (used by "add component" flows)
    pub make_default: MakeDefaultFn,
}

impl ComponentMetadata {
    /// Create metadata for a component type.
    ///
    /// The deserializer validates the JSON object against the declared
    /// schema before populating an instance, so malformed field values
    /// surface as typed [`SceneError`]s rather than opaque serde messages.
    pub fn new<T>() -> Self
    where
        T: Component + FieldAccess + Clone + std::fmt::Debug + Serialize + DeserializeOwned + Default,
    {
        Self {
            name: T::component_name(),
            type_id: TypeId::of::<T>(),
            schema: <T as Component>::schema(),
            serializer: Arc::new(|component| {
                let typed = component
                    .downcast_ref::<T>()
                    .ok_or_else(|| SceneError::Component {
                        tag: T::component_name().to_string(),
                        message: "type mismatch during serialization".to_string(),
                    })?;
                Ok(serde_json::to_value(typed)?)
            }),
            deserializer: Arc::new(|value| {
                <T as Component>::schema().validate(value)?;
                let component: T =
                    serde_json::from_value(value.clone()).map_err(|e| SceneError::Component {
                        tag: T::component_name().to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Box::new(component) as Box<dyn DynComponent>)
            }),
            make_default: Arc::new(|| Box::new(T::default()) as Box<dyn DynComponent>),
        }
    }
}

impl std::fmt::Debug for ComponentMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentMetadata")
            .field("name", &self.name)
            .field("type_id", &self.type_id)
            .field("schema", &self.schema.tag)
            .finish()
    }
}
