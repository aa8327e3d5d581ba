//! [Snapshot]: an immutable version of a single design object.

use crate::structure::Structure;
use crate::{ObjectId, ObjectView, SnapshotId};
use poietic_variant::Variant;
use std::collections::BTreeMap;

/// Lifecycle stage of a snapshot.
///
/// `Transient` snapshots live only inside a [crate::TransientObject] being edited;
/// `Validated` snapshots have passed schema/structural checks during `accept` but the
/// frame hasn't been installed yet; `Frozen` snapshots are part of an accepted
/// [crate::Snapshot] pool and are never mutated again.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotState {
    Transient,
    Validated,
    Frozen,
}

/// An immutable version of one design object.
///
/// Deeply immutable once frozen: its full state yields the same result for its entire
/// lifetime. A snapshot never points back at the frame(s) that reference it, only
/// forward, to other objects by [ObjectId].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    object_id: ObjectId,
    snapshot_id: SnapshotId,
    type_name: String,
    structure: Structure,
    parent: Option<ObjectId>,
    attributes: BTreeMap<String, Variant>,
    state: SnapshotState,
}

impl Snapshot {
    pub fn new(
        object_id: ObjectId,
        snapshot_id: SnapshotId,
        type_name: impl Into<String>,
        structure: Structure,
        parent: Option<ObjectId>,
        attributes: BTreeMap<String, Variant>,
        state: SnapshotState,
    ) -> Self {
        Snapshot {
            object_id,
            snapshot_id,
            type_name: type_name.into(),
            structure,
            parent,
            attributes,
            state,
        }
    }

    pub fn snapshot_id(&self) -> SnapshotId {
        self.snapshot_id
    }

    pub fn state(&self) -> SnapshotState {
        self.state
    }

    /// Derives a fresh snapshot of the same object: new [SnapshotId], same [ObjectId],
    /// attributes copied from `self`.
    pub fn derive(&self, new_snapshot_id: SnapshotId, state: SnapshotState) -> Snapshot {
        Snapshot {
            object_id: self.object_id,
            snapshot_id: new_snapshot_id,
            type_name: self.type_name.clone(),
            structure: self.structure.clone(),
            parent: self.parent,
            attributes: self.attributes.clone(),
            state,
        }
    }

    pub fn frozen(mut self) -> Snapshot {
        self.state = SnapshotState::Frozen;
        self
    }

    pub fn validated(mut self) -> Snapshot {
        self.state = SnapshotState::Validated;
        self
    }
}

impl ObjectView for Snapshot {
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
