//! Field access and schema descriptors for component types
//!
//! Instead of discovering fields through runtime reflection, every component
//! type declares a static [`Schema`] table. The same table drives wire-format
//! validation during decode and property-tree building in the inspector.

use crate::io::scene::SceneError;
use glam::Vec3;
use serde_json::Value;
use std::any::Any;
use std::fmt;

/// Accessor capability of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccessMode {
    /// Readable only; the inspector shows the field but rejects writes
    ReadOnly,
    /// Readable and writable
    ReadWrite,
}

/// Declared value kind of a field.
#[derive(Clone, Copy)]
pub enum FieldKind {
    Float,
    Int,
    Bool,
    String,
    /// Numeric triple, wire-encoded as a 3-element array `[x, y, z]`
    Vector3,
    /// Nested composite value described by its own schema
    Struct(&'static Schema),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Float => write!(f, "Float"),
            FieldKind::Int => write!(f, "Int"),
            FieldKind::Bool => write!(f, "Bool"),
            FieldKind::String => write!(f, "String"),
            FieldKind::Vector3 => write!(f, "Vector3"),
            // print the tag only; schemas may be self-referential
            FieldKind::Struct(schema) => write!(f, "Struct({})", schema.tag),
        }
    }
}

impl PartialEq for FieldKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldKind::Struct(a), FieldKind::Struct(b)) => a.tag == b.tag,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for FieldKind {}

/// One field of a component schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Machine name, matching the wire-mapped JSON key
    pub name: &'static str,
    pub kind: FieldKind,
    pub access: FieldAccessMode,
}

impl FieldInfo {
    /// Declare a readable-and-writable field
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            access: FieldAccessMode::ReadWrite,
        }
    }

    /// Declare a field the inspector may show but never write
    pub const fn read_only(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            access: FieldAccessMode::ReadOnly,
        }
    }

    pub fn is_writable(&self) -> bool {
        self.access == FieldAccessMode::ReadWrite
    }
}

/// Immutable field table for one component or nested struct type.
///
/// Declared once per concrete type as a `static`; declaration order is both
/// the wire order and the inspector display order.
#[derive(Debug)]
pub struct Schema {
    /// Type tag; for registered components this is the registry key
    pub tag: &'static str,
    pub fields: &'static [FieldInfo],
}

impl Schema {
    pub const fn new(tag: &'static str, fields: &'static [FieldInfo]) -> Self {
        Self { tag, fields }
    }

    /// Look up a declared field by machine name
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Check a JSON component object against the declared field kinds.
    ///
    /// Missing fields are not an error (they fall back to the type's
    /// defaults during deserialization); present fields must match their
    /// declared kind. A declared `Vector3` field whose value is not exactly
    /// a 3-element numeric array fails with [`SceneError::MalformedVector`].
    pub fn validate(&self, value: &Value) -> Result<(), SceneError> {
        let Some(object) = value.as_object() else {
            return Err(SceneError::Component {
                tag: self.tag.to_string(),
                message: "expected a JSON object".to_string(),
            });
        };

        for field in self.fields {
            if let Some(raw) = object.get(field.name) {
                self.validate_field(field, raw)?;
            }
        }
        Ok(())
    }

    fn validate_field(&self, field: &FieldInfo, raw: &Value) -> Result<(), SceneError> {
        let mismatch = |expected: &str| SceneError::Component {
            tag: self.tag.to_string(),
            message: format!("field '{}' is not a {expected}", field.name),
        };

        match field.kind {
            FieldKind::Float => {
                if !raw.is_number() {
                    return Err(mismatch("number"));
                }
            }
            FieldKind::Int => {
                if !raw.is_i64() && !raw.is_u64() {
                    return Err(mismatch("integer"));
                }
            }
            FieldKind::Bool => {
                if !raw.is_boolean() {
                    return Err(mismatch("boolean"));
                }
            }
            FieldKind::String => {
                if !raw.is_string() {
                    return Err(mismatch("string"));
                }
            }
            FieldKind::Vector3 => {
                let is_triple = raw
                    .as_array()
                    .is_some_and(|array| array.len() == 3 && array.iter().all(Value::is_number));
                if !is_triple {
                    return Err(SceneError::MalformedVector {
                        tag: self.tag.to_string(),
                        field: field.name.to_string(),
                    });
                }
            }
            FieldKind::Struct(schema) => {
                // null encodes an absent composite
                if !raw.is_null() {
                    schema.validate(raw)?;
                }
            }
        }
        Ok(())
    }
}

/// Object-safe bundle for nested composite values carried inside a
/// [`FieldValue`] snapshot.
pub trait StructValue: FieldAccess + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn StructValue>;
}

impl<T> StructValue for T
where
    T: FieldAccess + Clone + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn StructValue> {
        Box::new(self.clone())
    }
}

/// An owned snapshot of one field's current value.
#[derive(Debug)]
pub enum FieldValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    String(String),
    Vector3(Vec3),
    /// Nested composite value, `None` when the composite is absent
    Struct(Option<Box<dyn StructValue>>),
}

impl Clone for FieldValue {
    fn clone(&self) -> Self {
        match self {
            FieldValue::Float(v) => FieldValue::Float(*v),
            FieldValue::Int(v) => FieldValue::Int(*v),
            FieldValue::Bool(v) => FieldValue::Bool(*v),
            FieldValue::String(v) => FieldValue::String(v.clone()),
            FieldValue::Vector3(v) => FieldValue::Vector3(*v),
            FieldValue::Struct(v) => {
                FieldValue::Struct(v.as_ref().map(|inner| inner.clone_boxed()))
            }
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Vector3(a), FieldValue::Vector3(b)) => a == b,
            (FieldValue::Struct(a), FieldValue::Struct(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => struct_values_equal(a.as_ref(), b.as_ref()),
                _ => false,
            },
            _ => false,
        }
    }
}

impl FieldValue {
    /// Try to get as f32
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as Vec3
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            FieldValue::Vector3(v) => Some(*v),
            _ => None,
        }
    }
}

/// Structural equality over two composite values: same tag, equal fields.
pub fn struct_values_equal(a: &dyn FieldAccess, b: &dyn FieldAccess) -> bool {
    if a.schema().tag != b.schema().tag {
        return false;
    }
    a.schema()
        .fields
        .iter()
        .all(|field| a.get_field(field.name) == b.get_field(field.name))
}

/// Typed access to a component's declared fields.
///
/// Reading never mutates the instance; writing replaces the field value
/// wholesale. `set_field` returns false when the field is unknown or the
/// value's kind does not match the declaration.
pub trait FieldAccess: Send + Sync {
    fn schema(&self) -> &'static Schema;

    fn get_field(&self, name: &str) -> Option<FieldValue>;

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static POINT_SCHEMA: Schema = Schema::new(
        "Point",
        &[
            FieldInfo::new("label", FieldKind::String),
            FieldInfo::new("offset", FieldKind::Vector3),
        ],
    );

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Point {
        label: String,
        offset: Vec3,
    }

    impl FieldAccess for Point {
        fn schema(&self) -> &'static Schema {
            &POINT_SCHEMA
        }

        fn get_field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "label" => Some(FieldValue::String(self.label.clone())),
                "offset" => Some(FieldValue::Vector3(self.offset)),
                _ => None,
            }
        }

        fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
            match (name, value) {
                ("label", FieldValue::String(v)) => {
                    self.label = v;
                    true
                }
                ("offset", FieldValue::Vector3(v)) => {
                    self.offset = v;
                    true
                }
                _ => false,
            }
        }
    }

    #[test]
    fn test_schema_field_lookup() {
        assert_eq!(POINT_SCHEMA.field("label").unwrap().name, "label");
        assert!(POINT_SCHEMA.field("missing").is_none());
    }

    #[test]
    fn test_validate_accepts_well_formed_object() {
        let value = json!({ "label": "origin", "offset": [0.0, 1.0, 2.0] });
        assert!(POINT_SCHEMA.validate(&value).is_ok());
    }

    #[test]
    fn test_validate_accepts_missing_fields() {
        let value = json!({ "label": "origin" });
        assert!(POINT_SCHEMA.validate(&value).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_vector() {
        let value = json!({ "offset": [1.0, 2.0] });
        let err = POINT_SCHEMA.validate(&value).unwrap_err();
        assert!(matches!(err, SceneError::MalformedVector { .. }));
    }

    #[test]
    fn test_validate_rejects_non_numeric_vector() {
        let value = json!({ "offset": [1.0, "two", 3.0] });
        let err = POINT_SCHEMA.validate(&value).unwrap_err();
        assert!(matches!(err, SceneError::MalformedVector { .. }));
    }

    #[test]
    fn test_validate_rejects_non_object() {
        let err = POINT_SCHEMA.validate(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, SceneError::Component { .. }));
    }

    #[test]
    fn test_validate_kind_mismatch() {
        let value = json!({ "label": 42 });
        let err = POINT_SCHEMA.validate(&value).unwrap_err();
        assert!(matches!(err, SceneError::Component { .. }));
    }

    #[test]
    fn test_field_value_structural_equality() {
        let a = FieldValue::Struct(Some(Box::new(Point {
            label: "a".to_string(),
            offset: Vec3::X,
        })));
        let b = FieldValue::Struct(Some(Box::new(Point {
            label: "a".to_string(),
            offset: Vec3::X,
        })));
        let c = FieldValue::Struct(Some(Box::new(Point {
            label: "a".to_string(),
            offset: Vec3::Y,
        })));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, FieldValue::Struct(None));
        assert_eq!(FieldValue::Struct(None), FieldValue::Struct(None));
    }

    #[test]
    fn test_field_value_clone_is_deep() {
        let original = FieldValue::Struct(Some(Box::new(Point {
            label: "a".to_string(),
            offset: Vec3::ZERO,
        })));
        let cloned = original.clone();
        assert_eq!(original, cloned);
    }
}
