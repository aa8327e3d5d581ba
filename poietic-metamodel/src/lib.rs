//! Metamodel: the declarative schema for one modeling domain (object types, traits,
//! attribute schemas, edge rules, and constraints).
//!
//! A [Metamodel] is immutable once built and composable by [Metamodel::merge]: later
//! definitions override same-named earlier ones, the way a later module shadows an
//! earlier declaration of the same name.

mod constraint;
mod edge_rule;
mod object_type;
mod trait_def;

pub use constraint::{Constraint, Requirement};
pub use edge_rule::{Cardinality, EdgeCardinalityViolation, EdgeRule, EdgeRuleViolation};
pub use object_type::{ObjectType, StructuralType};
pub use trait_def::{Attribute, Trait};

use poietic_graph::FrameView;
use std::collections::BTreeMap;
use thiserror::Error;

/// A named, composable schema: object types, traits, edge rules, and constraints for
/// one modeling domain (the first concrete one being Stock-and-Flow).
///
/// Generic over the frame type its [Constraint]s are checked against, in practice
/// `poietic-store`'s `TransientFrame`, the only frame kind `accept` runs constraints
/// over.
pub struct Metamodel<F: FrameView> {
    name: String,
    version: Option<String>,
    traits: BTreeMap<String, Trait>,
    object_types: BTreeMap<String, ObjectType>,
    edge_rules: Vec<EdgeRule>,
    constraints: BTreeMap<String, Constraint<F>>,
}

impl<F: FrameView> Clone for Metamodel<F> {
    fn clone(&self) -> Self {
        Metamodel {
            name: self.name.clone(),
            version: self.version.clone(),
            traits: self.traits.clone(),
            object_types: self.object_types.clone(),
            edge_rules: self.edge_rules.clone(),
            constraints: self.constraints.clone(),
        }
    }
}

/// Conflicts reported when composing two metamodels via [Metamodel::validate_mergeability].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeConflict {
    #[error("trait {0:?} is defined in both metamodels with incompatible attribute schemas")]
    IncompatibleTrait(String),
    #[error("object type {0:?} is defined in both metamodels with incompatible structural types")]
    IncompatibleObjectType(String),
}

impl<F: FrameView> Metamodel<F> {
    pub fn new(name: impl Into<String>) -> Self {
        Metamodel {
            name: name.into(),
            version: None,
            traits: BTreeMap::new(),
            object_types: BTreeMap::new(),
            edge_rules: Vec::new(),
            constraints: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn add_trait(&mut self, t: Trait) -> &mut Self {
        self.traits.insert(t.name().to_string(), t);
        self
    }

    pub fn add_object_type(&mut self, t: ObjectType) -> &mut Self {
        self.object_types.insert(t.name().to_string(), t);
        self
    }

    pub fn add_edge_rule(&mut self, rule: EdgeRule) -> &mut Self {
        self.edge_rules.push(rule);
        self
    }

    pub fn add_constraint(&mut self, c: Constraint<F>) -> &mut Self {
        self.constraints.insert(c.name().to_string(), c);
        self
    }

    /// Lookup by name; metamodels are small, so a `BTreeMap` already gives us this for
    /// free, exposed through an explicit accessor rather than a public field.
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.object_types.get(name)
    }

    pub fn trait_def(&self, name: &str) -> Option<&Trait> {
        self.traits.get(name)
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint<F>> {
        self.constraints.get(name)
    }

    pub fn object_types(&self) -> impl Iterator<Item = &ObjectType> {
        self.object_types.values()
    }

    pub fn traits(&self) -> impl Iterator<Item = &Trait> {
        self.traits.values()
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint<F>> {
        self.constraints.values()
    }

    pub fn edge_rules(&self) -> impl Iterator<Item = &EdgeRule> {
        self.edge_rules.iter()
    }

    /// Edge rules applicable to a given edge object-type name.
    pub fn edge_rules_for<'a>(&'a self, edge_type: &'a str) -> impl Iterator<Item = &'a EdgeRule> {
        self.edge_rules
            .iter()
            .filter(move |r| r.edge_type() == edge_type)
    }

    /// Reports conflicts that would arise from merging `other` into `self`, without
    /// mutating either. A conflict is a same-named trait or object type whose
    /// structural shape differs between the two metamodels.
    pub fn validate_mergeability(&self, other: &Metamodel<F>) -> Vec<MergeConflict> {
        let mut conflicts = Vec::new();
        for (name, their_trait) in &other.traits {
            if let Some(our_trait) = self.traits.get(name) {
                if our_trait != their_trait {
                    conflicts.push(MergeConflict::IncompatibleTrait(name.clone()));
                }
            }
        }
        for (name, their_type) in &other.object_types {
            if let Some(our_type) = self.object_types.get(name) {
                if our_type.structural_type() != their_type.structural_type() {
                    conflicts.push(MergeConflict::IncompatibleObjectType(name.clone()));
                }
            }
        }
        conflicts
    }

    /// Merges `other` into a fresh [Metamodel]: same-named traits, object types, and
    /// constraints in `other` override those in `self`; edge rules accumulate.
    pub fn merge(&self, other: &Metamodel<F>) -> Metamodel<F> {
        let mut merged = self.clone();
        for (name, t) in &other.traits {
            merged.traits.insert(name.clone(), t.clone());
        }
        for (name, t) in &other.object_types {
            merged.object_types.insert(name.clone(), t.clone());
        }
        for (name, c) in &other.constraints {
            merged.constraints.insert(name.clone(), c.clone());
        }
        merged.edge_rules.extend(other.edge_rules.iter().cloned());
        if other.version.is_some() {
            merged.version = other.version.clone();
        }
        merged
    }
}

#[cfg(test)]
mod tests;
