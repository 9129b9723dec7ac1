//! Built-in component set shared with the engine's scene format

use super::field_access::{FieldAccess, FieldInfo, FieldKind, FieldValue, Schema, StructValue};
use super::{Component, ComponentMetadata};
use crate::io::component_registry::ComponentRegistry;
use crate::io::scene::SceneError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

static NAME_SCHEMA: Schema = Schema::new(
    "NameComponent",
    &[FieldInfo::new("name", FieldKind::String)],
);

/// User-facing entity label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
    pub name: String,
}

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for Name {
    fn component_name() -> &'static str {
        "NameComponent"
    }

    fn schema() -> &'static Schema {
        &NAME_SCHEMA
    }

    fn register(registry: &mut ComponentRegistry) -> Result<(), SceneError> {
        registry.register_with_metadata(ComponentMetadata::new::<Self>())
    }
}

impl FieldAccess for Name {
    fn schema(&self) -> &'static Schema {
        &NAME_SCHEMA
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::String(self.name.clone())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("name", FieldValue::String(v)) => {
                self.name = v;
                true
            }
            _ => false,
        }
    }
}

static TRANSFORM_SCHEMA: Schema = Schema::new(
    "TransformComponent",
    &[
        FieldInfo::new("position", FieldKind::Vector3),
        FieldInfo::new("rotation", FieldKind::Vector3),
        FieldInfo::new("scale", FieldKind::Vector3),
    ],
);

/// Position, euler rotation, and scale in local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Component for Transform {
    fn component_name() -> &'static str {
        "TransformComponent"
    }

    fn schema() -> &'static Schema {
        &TRANSFORM_SCHEMA
    }

    fn register(registry: &mut ComponentRegistry) -> Result<(), SceneError> {
        registry.register_with_metadata(ComponentMetadata::new::<Self>())
    }
}

impl FieldAccess for Transform {
    fn schema(&self) -> &'static Schema {
        &TRANSFORM_SCHEMA
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "position" => Some(FieldValue::Vector3(self.position)),
            "rotation" => Some(FieldValue::Vector3(self.rotation)),
            "scale" => Some(FieldValue::Vector3(self.scale)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("position", FieldValue::Vector3(v)) => {
                self.position = v;
                true
            }
            ("rotation", FieldValue::Vector3(v)) => {
                self.rotation = v;
                true
            }
            ("scale", FieldValue::Vector3(v)) => {
                self.scale = v;
                true
            }
            _ => false,
        }
    }
}

static CLIP_PLANES_SCHEMA: Schema = Schema::new(
    "ClipPlanes",
    &[
        FieldInfo::new("near", FieldKind::Float),
        FieldInfo::new("far", FieldKind::Float),
    ],
);

/// Near/far clip distances, nested inside [`Camera`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipPlanes {
    pub near: f32,
    pub far: f32,
}

impl Default for ClipPlanes {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl FieldAccess for ClipPlanes {
    fn schema(&self) -> &'static Schema {
        &CLIP_PLANES_SCHEMA
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "near" => Some(FieldValue::Float(self.near)),
            "far" => Some(FieldValue::Float(self.far)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("near", FieldValue::Float(v)) => {
                self.near = v;
                true
            }
            ("far", FieldValue::Float(v)) => {
                self.far = v;
                true
            }
            _ => false,
        }
    }
}

static CAMERA_SCHEMA: Schema = Schema::new(
    "CameraComponent",
    &[
        FieldInfo::new("fov", FieldKind::Float),
        FieldInfo::new("clip", FieldKind::Struct(&CLIP_PLANES_SCHEMA)),
    ],
);

/// Perspective camera settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub clip: ClipPlanes,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 60.0,
            clip: ClipPlanes::default(),
        }
    }
}

impl Component for Camera {
    fn component_name() -> &'static str {
        "CameraComponent"
    }

    fn schema() -> &'static Schema {
        &CAMERA_SCHEMA
    }

    fn register(registry: &mut ComponentRegistry) -> Result<(), SceneError> {
        registry.register_with_metadata(ComponentMetadata::new::<Self>())
    }
}

impl FieldAccess for Camera {
    fn schema(&self) -> &'static Schema {
        &CAMERA_SCHEMA
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "fov" => Some(FieldValue::Float(self.fov)),
            "clip" => Some(FieldValue::Struct(Some(Box::new(self.clip)))),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("fov", FieldValue::Float(v)) => {
                self.fov = v;
                true
            }
            ("clip", FieldValue::Struct(Some(v))) => {
                match v.as_any().downcast_ref::<ClipPlanes>() {
                    Some(clip) => {
                        self.clip = *clip;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

static MATERIAL_SCHEMA: Schema = Schema::new(
    "Material",
    &[
        FieldInfo::new("base_color", FieldKind::Vector3),
        FieldInfo::new("roughness", FieldKind::Float),
    ],
);

/// Surface appearance override, nested inside [`MeshRenderer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Linear RGB base color
    pub base_color: Vec3,
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: Vec3::ONE,
            roughness: 0.5,
        }
    }
}

impl FieldAccess for Material {
    fn schema(&self) -> &'static Schema {
        &MATERIAL_SCHEMA
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "base_color" => Some(FieldValue::Vector3(self.base_color)),
            "roughness" => Some(FieldValue::Float(self.roughness)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("base_color", FieldValue::Vector3(v)) => {
                self.base_color = v;
                true
            }
            ("roughness", FieldValue::Float(v)) => {
                self.roughness = v;
                true
            }
            _ => false,
        }
    }
}

static MESH_RENDERER_SCHEMA: Schema = Schema::new(
    "MeshComponent",
    &[
        FieldInfo::new("mesh", FieldKind::String),
        FieldInfo::new("visible", FieldKind::Bool),
        FieldInfo::new("material", FieldKind::Struct(&MATERIAL_SCHEMA)),
    ],
);

/// Reference to an engine-side mesh asset plus an optional material override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshRenderer {
    /// Engine asset name of the mesh
    pub mesh: String,
    pub visible: bool,
    /// `None` falls back to the mesh's default material
    pub material: Option<Material>,
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self {
            mesh: String::new(),
            visible: true,
            material: None,
        }
    }
}

impl Component for MeshRenderer {
    fn component_name() -> &'static str {
        "MeshComponent"
    }

    fn schema() -> &'static Schema {
        &MESH_RENDERER_SCHEMA
    }

    fn register(registry: &mut ComponentRegistry) -> Result<(), SceneError> {
        registry.register_with_metadata(ComponentMetadata::new::<Self>())
    }
}

impl FieldAccess for MeshRenderer {
    fn schema(&self) -> &'static Schema {
        &MESH_RENDERER_SCHEMA
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "mesh" => Some(FieldValue::String(self.mesh.clone())),
            "visible" => Some(FieldValue::Bool(self.visible)),
            "material" => Some(FieldValue::Struct(
                self.material.map(|m| Box::new(m) as Box<dyn StructValue>),
            )),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("mesh", FieldValue::String(v)) => {
                self.mesh = v;
                true
            }
            ("visible", FieldValue::Bool(v)) => {
                self.visible = v;
                true
            }
            ("material", FieldValue::Struct(None)) => {
                self.material = None;
                true
            }
            ("material", FieldValue::Struct(Some(v))) => {
                match v.as_any().downcast_ref::<Material>() {
                    Some(material) => {
                        self.material = Some(*material);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

/// Register the built-in component set
pub fn register_default_components(registry: &mut ComponentRegistry) -> Result<(), SceneError> {
    Name::register(registry)?;
    Transform::register(registry)?;
    Camera::register(registry)?;
    MeshRenderer::register(registry)?;
    Ok(())
}
