//! Property inspection over schema-declared components
//!
//! Builds an editable property tree from any [`FieldAccess`] value and
//! routes edits back through dotted paths. The tree is a snapshot; it is
//! rebuilt whenever the selection or the underlying component changes.

use crate::component_system::field_access::{
    FieldAccess, FieldInfo, FieldKind, FieldValue,
};
use crate::io::scene::SceneError;
use tracing::warn;

pub mod notify;
pub mod selection;

pub use notify::{ChangeEvent, ChangeNotifier, ObserverError, Subscription};
pub use selection::EntitySelection;

/// Nesting bound for property trees. Schemas can be self-referential, so
/// expansion stops here instead of recursing forever.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Turn a machine field name into a human-readable label.
///
/// Splits snake_case on underscores and camelCase on interior capitals,
/// capitalizing each word: `base_color` and `baseColor` both become
/// `Base Color`.
pub fn display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut start_of_word = true;
    for ch in name.chars() {
        if ch == '_' {
            out.push(' ');
            start_of_word = true;
        } else if ch.is_uppercase() {
            if !start_of_word && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push(ch);
            start_of_word = false;
        } else if start_of_word {
            out.extend(ch.to_uppercase());
            start_of_word = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// One node of an inspector property tree.
///
/// The tree holds one node per writable field, in schema declaration
/// order; read-only fields are not shown.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    /// Human-readable label, derived from the machine name; empty for a
    /// degenerate node
    pub name: String,
    /// Machine name, the segment used in write paths
    pub field: String,
    pub kind: FieldKind,
    /// Snapshot of the current value; `None` when the owner failed to
    /// produce one for a declared field
    pub value: Option<FieldValue>,
    /// True for nodes edited in place; false for nodes expanded into
    /// children
    pub inlineable: bool,
    pub children: Vec<PropertyNode>,
}

/// Build the property tree for one component, using the default depth bound
pub fn build_property_tree(component: &dyn FieldAccess) -> Vec<PropertyNode> {
    build_property_tree_bounded(component, DEFAULT_MAX_DEPTH)
}

/// Build the property tree for one component with an explicit depth bound
pub fn build_property_tree_bounded(
    component: &dyn FieldAccess,
    max_depth: usize,
) -> Vec<PropertyNode> {
    component
        .schema()
        .fields
        .iter()
        .filter(|field| field.is_writable())
        .map(|field| build_property_node(component, field, max_depth))
        .collect()
}

fn build_property_node(
    owner: &dyn FieldAccess,
    field: &FieldInfo,
    depth_budget: usize,
) -> PropertyNode {
    let mut node = PropertyNode {
        name: display_name(field.name),
        field: field.name.to_string(),
        kind: field.kind,
        value: owner.get_field(field.name),
        inlineable: true,
        children: Vec::new(),
    };

    // a declared field the owner cannot produce becomes a degenerate
    // placeholder leaf
    let Some(value) = &node.value else {
        node.name = String::new();
        return node;
    };

    match value {
        FieldValue::Vector3(v) => {
            node.inlineable = false;
            node.children = [("x", v.x), ("y", v.y), ("z", v.z)]
                .into_iter()
                .map(|(axis, component)| PropertyNode {
                    name: display_name(axis),
                    field: axis.to_string(),
                    kind: FieldKind::Float,
                    value: Some(FieldValue::Float(component)),
                    inlineable: true,
                    children: Vec::new(),
                })
                .collect();
        }
        FieldValue::Struct(Some(inner)) => {
            if depth_budget == 0 {
                // a truncated composite stays an inline leaf so no empty
                // expander is rendered
                warn!(
                    field = field.name,
                    "Property tree reached the depth bound, truncating"
                );
            } else {
                node.inlineable = false;
                let inner: &dyn FieldAccess = inner.as_ref();
                node.children = inner
                    .schema()
                    .fields
                    .iter()
                    .filter(|child| child.is_writable())
                    .map(|child| build_property_node(inner, child, depth_budget - 1))
                    .collect();
            }
        }
        // absent composites and primitives are edited in place
        _ => {}
    }

    node
}

/// Write one field by dotted path segments, then notify.
///
/// The notification fires only after the write has landed, so observers
/// always see the post-write state. A failed write never notifies.
pub fn write_property(
    owner: &mut dyn FieldAccess,
    path: &[&str],
    value: FieldValue,
    notifier: &mut ChangeNotifier,
) -> Result<(), SceneError> {
    write_nested(owner, path, value.clone())?;
    notifier.notify(&ChangeEvent {
        source: owner.schema().tag.to_string(),
        field: path.join("."),
        value,
    });
    Ok(())
}

fn write_nested(
    owner: &mut dyn FieldAccess,
    path: &[&str],
    value: FieldValue,
) -> Result<(), SceneError> {
    let [head, rest @ ..] = path else {
        return Err(SceneError::InvalidWrite("empty property path".to_string()));
    };

    let field = owner
        .schema()
        .field(head)
        .ok_or_else(|| SceneError::UnknownField((*head).to_string()))?;
    if !field.is_writable() {
        return Err(SceneError::ReadOnlyField((*head).to_string()));
    }

    if rest.is_empty() {
        if owner.set_field(head, value) {
            return Ok(());
        }
        return Err(SceneError::InvalidWrite(format!(
            "'{}' rejected the value",
            head
        )));
    }

    // nested path: update a snapshot of the composite, then write it back
    let mut current = owner
        .get_field(head)
        .ok_or_else(|| SceneError::UnknownField((*head).to_string()))?;
    set_in_value(&mut current, rest, value)?;

    if owner.set_field(head, current) {
        Ok(())
    } else {
        Err(SceneError::InvalidWrite(format!(
            "'{}' rejected the updated value",
            head
        )))
    }
}

fn set_in_value(
    current: &mut FieldValue,
    path: &[&str],
    value: FieldValue,
) -> Result<(), SceneError> {
    match current {
        FieldValue::Vector3(v) => {
            let [axis] = path else {
                return Err(SceneError::InvalidWrite(
                    "vector components have no sub-fields".to_string(),
                ));
            };
            let Some(component) = value.as_f32() else {
                return Err(SceneError::InvalidWrite(
                    "vector components take float values".to_string(),
                ));
            };
            match *axis {
                "x" => v.x = component,
                "y" => v.y = component,
                "z" => v.z = component,
                other => return Err(SceneError::UnknownField(other.to_string())),
            }
            Ok(())
        }
        FieldValue::Struct(Some(inner)) => write_nested(inner.as_mut(), path, value),
        FieldValue::Struct(None) => Err(SceneError::InvalidWrite(
            "cannot set a field on an absent value".to_string(),
        )),
        _ => Err(SceneError::InvalidWrite(
            "value has no sub-fields".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_system::components::{Camera, Material, MeshRenderer, Transform};
    use crate::component_system::field_access::{FieldInfo, Schema, StructValue};
    use glam::Vec3;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("position"), "Position");
        assert_eq!(display_name("base_color"), "Base Color");
        assert_eq!(display_name("baseColor"), "Base Color");
        assert_eq!(display_name("MyProperty"), "My Property");
        assert_eq!(display_name("fov"), "Fov");
    }

    #[test]
    fn test_tree_over_transform() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let tree = build_property_tree(&transform);

        assert_eq!(tree.len(), 3);
        let position = &tree[0];
        assert_eq!(position.name, "Position");
        assert_eq!(position.field, "position");
        assert!(!position.inlineable);

        let axes: Vec<&str> = position.children.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(axes, vec!["x", "y", "z"]);
        assert_eq!(position.children[1].value, Some(FieldValue::Float(2.0)));
        assert!(position.children[1].inlineable);
    }

    #[test]
    fn test_tree_expands_nested_struct() {
        let camera = Camera::default();
        let tree = build_property_tree(&camera);

        let clip = tree.iter().find(|node| node.field == "clip").unwrap();
        assert!(!clip.inlineable);
        let names: Vec<&str> = clip.children.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(names, vec!["near", "far"]);
    }

    #[test]
    fn test_absent_struct_is_inlineable_leaf() {
        let renderer = MeshRenderer::default();
        let tree = build_property_tree(&renderer);

        let material = tree.iter().find(|node| node.field == "material").unwrap();
        assert_eq!(material.value, Some(FieldValue::Struct(None)));
        assert!(material.inlineable);
        assert!(material.children.is_empty());
    }

    #[test]
    fn test_present_struct_expands_recursively() {
        let renderer = MeshRenderer {
            material: Some(Material::default()),
            ..Default::default()
        };
        let tree = build_property_tree(&renderer);

        let material = tree.iter().find(|node| node.field == "material").unwrap();
        assert!(!material.inlineable);
        let base_color = material
            .children
            .iter()
            .find(|node| node.field == "base_color")
            .unwrap();
        assert_eq!(base_color.name, "Base Color");
        assert_eq!(base_color.children.len(), 3);
    }

    #[test]
    fn test_write_leaf_field() {
        let mut transform = Transform::default();
        let mut notifier = ChangeNotifier::new();

        write_property(
            &mut transform,
            &["position"],
            FieldValue::Vector3(Vec3::splat(2.0)),
            &mut notifier,
        )
        .unwrap();
        assert_eq!(transform.position, Vec3::splat(2.0));
    }

    #[test]
    fn test_write_vector_component() {
        let mut transform = Transform::default();
        let mut notifier = ChangeNotifier::new();

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        notifier.subscribe(move |event| {
            sink.lock().unwrap().push(event.clone());
            Ok(())
        });

        write_property(
            &mut transform,
            &["scale", "z"],
            FieldValue::Float(4.0),
            &mut notifier,
        )
        .unwrap();
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 4.0));

        // exactly one event, carrying the dotted path and the written value
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source, "TransformComponent");
        assert_eq!(events[0].field, "scale.z");
        assert_eq!(events[0].value, FieldValue::Float(4.0));
    }

    #[test]
    fn test_write_through_nested_struct() {
        let mut camera = Camera::default();
        let mut notifier = ChangeNotifier::new();

        write_property(
            &mut camera,
            &["clip", "far"],
            FieldValue::Float(500.0),
            &mut notifier,
        )
        .unwrap();
        assert_eq!(camera.clip.far, 500.0);
        // siblings are untouched
        assert_eq!(camera.clip.near, 0.1);
    }

    #[test]
    fn test_write_unknown_field() {
        let mut transform = Transform::default();
        let mut notifier = ChangeNotifier::new();

        let err = write_property(
            &mut transform,
            &["velocity"],
            FieldValue::Float(1.0),
            &mut notifier,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::UnknownField(name) if name == "velocity"));
    }

    #[test]
    fn test_write_absent_struct_fails() {
        let mut renderer = MeshRenderer::default();
        let mut notifier = ChangeNotifier::new();

        let err = write_property(
            &mut renderer,
            &["material", "roughness"],
            FieldValue::Float(0.1),
            &mut notifier,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::InvalidWrite(_)));
    }

    static GAUGE_SCHEMA: Schema = Schema::new(
        "Gauge",
        &[
            FieldInfo::new("target", FieldKind::Float),
            FieldInfo::read_only("reading", FieldKind::Float),
        ],
    );

    #[derive(Debug, Clone, Default)]
    struct Gauge {
        target: f32,
        reading: f32,
    }

    impl FieldAccess for Gauge {
        fn schema(&self) -> &'static Schema {
            &GAUGE_SCHEMA
        }

        fn get_field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "target" => Some(FieldValue::Float(self.target)),
                "reading" => Some(FieldValue::Float(self.reading)),
                _ => None,
            }
        }

        fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
            match (name, value) {
                ("target", FieldValue::Float(v)) => {
                    self.target = v;
                    true
                }
                _ => false,
            }
        }
    }

    #[test]
    fn test_read_only_field_is_hidden_and_rejects_writes() {
        let mut gauge = Gauge {
            target: 1.0,
            reading: 0.7,
        };
        let tree = build_property_tree(&gauge);

        // only the writable field appears
        let fields: Vec<&str> = tree.iter().map(|node| node.field.as_str()).collect();
        assert_eq!(fields, vec!["target"]);

        let mut notifier = ChangeNotifier::new();
        let err = write_property(
            &mut gauge,
            &["reading"],
            FieldValue::Float(2.0),
            &mut notifier,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::ReadOnlyField(name) if name == "reading"));
        assert_eq!(gauge.reading, 0.7);
    }

    static CHAIN_SCHEMA: Schema = Schema::new(
        "ChainLink",
        &[
            FieldInfo::new("label", FieldKind::String),
            FieldInfo::new("next", FieldKind::Struct(&CHAIN_SCHEMA)),
        ],
    );

    #[derive(Debug, Clone, Default)]
    struct ChainLink {
        label: String,
        next: Option<Box<ChainLink>>,
    }

    impl FieldAccess for ChainLink {
        fn schema(&self) -> &'static Schema {
            &CHAIN_SCHEMA
        }

        fn get_field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "label" => Some(FieldValue::String(self.label.clone())),
                "next" => Some(FieldValue::Struct(
                    self.next
                        .as_ref()
                        .map(|link| Box::new((**link).clone()) as Box<dyn StructValue>),
                )),
                _ => None,
            }
        }

        fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
            match (name, value) {
                ("label", FieldValue::String(v)) => {
                    self.label = v;
                    true
                }
                ("next", FieldValue::Struct(v)) => match v {
                    None => {
                        self.next = None;
                        true
                    }
                    Some(inner) => match inner.as_any().downcast_ref::<ChainLink>() {
                        Some(link) => {
                            self.next = Some(Box::new(link.clone()));
                            true
                        }
                        None => false,
                    },
                },
                _ => false,
            }
        }
    }

    fn chain(length: usize) -> ChainLink {
        let mut link = ChainLink {
            label: "tail".to_string(),
            next: None,
        };
        for i in (0..length).rev() {
            link = ChainLink {
                label: format!("link {i}"),
                next: Some(Box::new(link)),
            };
        }
        link
    }

    fn tree_depth(nodes: &[PropertyNode]) -> usize {
        nodes
            .iter()
            .map(|node| 1 + tree_depth(&node.children))
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_depth_bound_truncates_recursive_schema() {
        let deep = chain(32);
        let tree = build_property_tree_bounded(&deep, 4);
        assert!(tree_depth(&tree) <= 5);

        let default_tree = build_property_tree(&deep);
        assert!(tree_depth(&default_tree) <= DEFAULT_MAX_DEPTH + 1);
    }

    #[test]
    fn test_truncated_composite_stays_inline_leaf() {
        let deep = chain(2);
        let tree = build_property_tree_bounded(&deep, 0);

        let next = tree.iter().find(|node| node.field == "next").unwrap();
        assert!(next.children.is_empty());
        assert!(next.inlineable);
    }
}
