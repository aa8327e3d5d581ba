//! [DesignFrame]: an immutable, accepted snapshot of a whole design state.

use poietic_graph::FrameView;
use poietic_object::{ObjectId, Snapshot};
use std::collections::BTreeMap;
use std::rc::Rc;

/// An accepted, immutable frame: `id`, and an index from every live `ObjectId` to the
/// [Snapshot] frozen at accept time. Shared snapshots are held by [Rc] so a snapshot is
/// dropped only once no frame references it.
#[derive(Debug, Clone)]
pub struct DesignFrame {
    id: poietic_object::FrameId,
    objects: BTreeMap<ObjectId, Rc<Snapshot>>,
}

impl DesignFrame {
    pub(crate) fn new(
        id: poietic_object::FrameId,
        objects: BTreeMap<ObjectId, Rc<Snapshot>>,
    ) -> Self {
        DesignFrame { id, objects }
    }

    pub fn id(&self) -> poietic_object::FrameId {
        self.id
    }

    pub fn get(&self, id: ObjectId) -> Option<&Snapshot> {
        self.objects.get(&id).map(Rc::as_ref)
    }

    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub(crate) fn objects(&self) -> &BTreeMap<ObjectId, Rc<Snapshot>> {
        &self.objects
    }
}

impl FrameView for DesignFrame {
    type Object = Snapshot;

    fn object_ids(&self) -> impl Iterator<Item = ObjectId> {
        self.objects.keys().copied()
    }

    fn get(&self, id: ObjectId) -> Option<&Snapshot> {
        self.objects.get(&id).map(Rc::as_ref)
    }
}
