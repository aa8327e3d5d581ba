//! [TransientObject]: a mutable working copy of a design object inside an open
//! [crate::TransientObject] editing session (owned by a `TransientFrame` in
//! `poietic-store`).

use crate::snapshot::{Snapshot, SnapshotState};
use crate::structure::Structure;
use crate::{ObjectId, ObjectView, SnapshotId};
use poietic_variant::{ValueType, Variant};
use std::collections::BTreeMap;
use thiserror::Error;

/// Failures raised directly by the object model (as opposed to accept-time batch
/// validation, which lives in `poietic-store`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectError {
    /// Attribute key not declared by any trait of the object's type. The caller
    /// (which owns the metamodel) is the one that determines this; the object model
    /// only surfaces it.
    #[error("attribute {0:?} is not declared by this object's type")]
    UnknownAttribute(String),
    /// The attribute exists but the value's [ValueType] doesn't match the declared one.
    #[error("attribute {key:?} expects {expected}, got a value of type {found}")]
    AttributeTypeMismatch {
        key: String,
        expected: ValueType,
        found: ValueType,
    },
}

/// A mutable in-progress version of a design object, identified by its stable
/// [ObjectId] but not yet assigned a final [SnapshotId] state (`Validated`/`Frozen`).
#[derive(Debug, Clone, PartialEq)]
pub struct TransientObject {
    object_id: ObjectId,
    type_name: String,
    structure: Structure,
    parent: Option<ObjectId>,
    attributes: BTreeMap<String, Variant>,
}

impl TransientObject {
    /// Creates a new transient object. `structure`'s [crate::structure::StructuralKind]
    /// is the caller's responsibility to match against the object type's declared
    /// structural type, checked by the store using the metamodel.
    pub fn new(
        object_id: ObjectId,
        type_name: impl Into<String>,
        structure: Structure,
        parent: Option<ObjectId>,
        attributes: BTreeMap<String, Variant>,
    ) -> Self {
        TransientObject {
            object_id,
            type_name: type_name.into(),
            structure,
            parent,
            attributes,
        }
    }

    /// Starts editing from an existing frozen snapshot (copy-on-write).
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        TransientObject {
            object_id: snapshot.object_id(),
            type_name: snapshot.type_name().to_string(),
            structure: snapshot.structure().clone(),
            parent: snapshot.parent(),
            attributes: snapshot.attributes().clone(),
        }
    }

    pub fn set_structure(&mut self, structure: Structure) {
        self.structure = structure;
    }

    pub fn set_parent(&mut self, parent: Option<ObjectId>) {
        self.parent = parent;
    }

    /// Sets an attribute. `declared` is the result of the caller looking the key up in
    /// the object type's traits: `None` means the key is unknown, `Some(vt)` is the
    /// declared [ValueType] to check the value against.
    pub fn set_attribute(
        &mut self,
        key: &str,
        value: Variant,
        declared: Option<ValueType>,
    ) -> Result<(), ObjectError> {
        let Some(expected) = declared else {
            return Err(ObjectError::UnknownAttribute(key.to_string()));
        };
        if !value.matches_type(expected) {
            return Err(ObjectError::AttributeTypeMismatch {
                key: key.to_string(),
                expected,
                found: value.value_type().unwrap_or(expected),
            });
        }
        self.attributes.insert(key.to_string(), value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<Variant> {
        self.attributes.remove(key)
    }

    pub fn prune_advisory_reference(&mut self, removed: ObjectId) {
        self.structure.prune_advisory_reference(removed);
    }

    /// Freezes this transient object into a [Snapshot] with a freshly allocated
    /// [SnapshotId].
    pub fn into_snapshot(self, snapshot_id: SnapshotId, state: SnapshotState) -> Snapshot {
        Snapshot::new(
            self.object_id,
            snapshot_id,
            self.type_name,
            self.structure,
            self.parent,
            self.attributes,
            state,
        )
    }
}

impl ObjectView for TransientObject {
    fn object_id(&self) -> ObjectId {
        self.object_id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn structure(&self) -> &Structure {
        &self.structure
    }

    fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    fn attribute(&self, key: &str) -> Option<&Variant> {
        self.attributes.get(key)
    }

    fn attributes(&self) -> &BTreeMap<String, Variant> {
        &self.attributes
    }
}
