//! [ObjectType]: name, structural class, and composed traits.

use poietic_object::Structure;
use crate::Trait;

/// The structural class an [ObjectType] instantiates as. Mirrors
/// [poietic_object::Structure]'s shape, but at the schema level rather than the
/// per-instance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralType {
    Unstructured,
    Node,
    Edge,
    OrderedSet,
}

impl StructuralType {
    /// Whether a concrete [Structure] instance matches this structural class.
    pub fn matches(&self, structure: &Structure) -> bool {
        matches!(
            (self, structure),
            (StructuralType::Unstructured, Structure::Unstructured)
                | (StructuralType::Node, Structure::Node)
                | (StructuralType::Edge, Structure::Edge { .. })
                | (StructuralType::OrderedSet, Structure::OrderedSet { .. })
        )
    }
}

/// A named object type: its structural class, the traits it composes, and whether it
/// is system-owned (created by the store itself, never by a caller).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    name: String,
    structural_type: StructuralType,
    traits: Vec<String>,
    system_owned: bool,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, structural_type: StructuralType) -> Self {
        ObjectType {
            name: name.into(),
            structural_type,
            traits: Vec::new(),
            system_owned: false,
        }
    }

    pub fn with_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.traits.push(trait_name.into());
        self
    }

    pub fn system_owned(mut self) -> Self {
        self.system_owned = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn structural_type(&self) -> StructuralType {
        self.structural_type
    }

    pub fn trait_names(&self) -> &[String] {
        &self.traits
    }

    pub fn is_system_owned(&self) -> bool {
        self.system_owned
    }

    /// Resolves this type's full attribute schema by looking up each composed trait
    /// in `traits`, flattened into one namespace (later traits override earlier ones
    /// that declare the same attribute name).
    pub fn resolve_attributes<'a>(
        &self,
        traits: impl Fn(&str) -> Option<&'a Trait>,
    ) -> Vec<&'a crate::Attribute> {
        let mut by_name = std::collections::BTreeMap::new();
        for trait_name in &self.traits {
            if let Some(t) = traits(trait_name) {
                for attribute in t.attributes() {
                    by_name.insert(attribute.name().to_string(), attribute);
                }
            }
        }
        by_name.into_values().collect()
    }
}
