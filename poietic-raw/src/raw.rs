//! Version-neutral flat representation of a [poietic_store::Design]: every snapshot
//! and frame it has ever accepted (the undo/redo window, named frames, and the
//! current frame), laid out for an external serializer to write to disk.

use poietic_object::{FrameId, ObjectId, SnapshotId, Structure};
use poietic_variant::Variant;
use std::collections::BTreeMap;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct RawSnapshot {
    pub type_name: String,
    pub snapshot_id: SnapshotId,
    pub id: ObjectId,
    pub structure: Structure,
    pub parent: Option<ObjectId>,
    pub attributes: BTreeMap<String, Variant>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct RawFrame {
    pub id: FrameId,
    pub snapshots: Vec<SnapshotId>,
}

/// `userReferences` names a frame the caller bound with [poietic_store::Design::name_frame];
/// `systemReferences["current_frame"]` is always present.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct RawDesign {
    pub metamodel_name: String,
    pub metamodel_version: Option<String>,
    pub snapshots: Vec<RawSnapshot>,
    pub frames: Vec<RawFrame>,
    pub user_references: BTreeMap<String, FrameId>,
    pub system_references: BTreeMap<String, FrameId>,
    pub system_lists: BTreeMap<String, Vec<FrameId>>,
}
