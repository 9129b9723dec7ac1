//! Cross-cutting component system tests

use crate::component_system::components::{Camera, MeshRenderer, Name, Transform};
use crate::component_system::{components_equal, Component, ComponentMetadata, DynComponent};
use crate::io::scene::SceneError;
use glam::Vec3;
use serde_json::json;

#[test]
fn test_metadata_reports_type_identity() {
    let metadata = ComponentMetadata::new::<Transform>();
    assert_eq!(metadata.name, "TransformComponent");
    assert_eq!(metadata.type_id, std::any::TypeId::of::<Transform>());
    assert_eq!(metadata.schema.tag, "TransformComponent");
}

#[test]
fn test_metadata_roundtrip_through_closures() {
    let metadata = ComponentMetadata::new::<Transform>();
    let original = Transform {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::new(0.0, 90.0, 0.0),
        scale: Vec3::splat(2.0),
    };

    let value = (metadata.serializer)(&original).unwrap();
    let instance = (metadata.deserializer)(&value).unwrap();
    let decoded = instance.as_any().downcast_ref::<Transform>().unwrap();
    assert_eq!(*decoded, original);
}

#[test]
fn test_metadata_deserializer_rejects_malformed_vector() {
    let metadata = ComponentMetadata::new::<Transform>();
    let err = (metadata.deserializer)(&json!({ "position": [1.0, 2.0] })).unwrap_err();
    assert!(
        matches!(err, SceneError::MalformedVector { ref tag, ref field }
            if tag == "TransformComponent" && field == "position")
    );
}

#[test]
fn test_metadata_deserializer_rejects_kind_mismatch() {
    let metadata = ComponentMetadata::new::<Name>();
    let err = (metadata.deserializer)(&json!({ "name": 7 })).unwrap_err();
    assert!(matches!(err, SceneError::Component { .. }));
}

#[test]
fn test_metadata_deserializer_fills_defaults() {
    let metadata = ComponentMetadata::new::<Camera>();
    let instance = (metadata.deserializer)(&json!({})).unwrap();
    let camera = instance.as_any().downcast_ref::<Camera>().unwrap();
    assert_eq!(camera.fov, 60.0);
    assert_eq!(camera.clip.far, 1000.0);
}

#[test]
fn test_make_default_produces_default_instance() {
    let metadata = ComponentMetadata::new::<MeshRenderer>();
    let instance = (metadata.make_default)();
    assert_eq!(instance.tag(), "MeshComponent");

    let renderer = instance.as_any().downcast_ref::<MeshRenderer>().unwrap();
    assert_eq!(*renderer, MeshRenderer::default());
}

#[test]
fn test_components_equal_is_structural() {
    let a = Transform::from_position(Vec3::X);
    let b = Transform::from_position(Vec3::X);
    let c = Transform::from_position(Vec3::Y);

    assert!(components_equal(&a, &b));
    assert!(!components_equal(&a, &c));
    assert!(!components_equal(&a, &Name::new("not a transform")));
}

#[test]
fn test_clone_boxed_preserves_concrete_type() {
    let original: Box<dyn DynComponent> = Box::new(Name::new("hero"));
    let clone = original.clone_boxed();

    assert_eq!(clone.tag(), "NameComponent");
    assert!(components_equal(original.as_ref(), clone.as_ref()));
    assert_eq!(
        clone.as_any().downcast_ref::<Name>().unwrap().name,
        "hero"
    );
}

#[test]
fn test_schema_accessors_agree() {
    // the static trait schema and the instance schema are the same table
    let transform = Transform::default();
    assert!(std::ptr::eq(
        <Transform as Component>::schema(),
        crate::component_system::field_access::FieldAccess::schema(&transform),
    ));
}
