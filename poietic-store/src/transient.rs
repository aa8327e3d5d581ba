//! [TransientFrame]: a mutable, copy-on-write working copy derived from a base frame.

use poietic_graph::FrameView;
use poietic_object::{ObjectId, ObjectView, Snapshot, Structure, TransientObject};
use poietic_variant::Variant;
use std::collections::BTreeMap;
use std::rc::Rc;

/// One object as seen through a [TransientFrame]: either untouched since the base
/// frame (`Frozen`, shared by [Rc]) or currently being edited (`Editing`).
#[derive(Debug, Clone)]
pub enum FrameObject {
    Frozen(Rc<Snapshot>),
    Editing(TransientObject),
}

impl ObjectView for FrameObject {
    fn object_id(&self) -> ObjectId {
        match self {
            FrameObject::Frozen(s) => s.object_id(),
            FrameObject::Editing(o) => o.object_id(),
        }
    }

    fn type_name(&self) -> &str {
        match self {
            FrameObject::Frozen(s) => s.type_name(),
            FrameObject::Editing(o) => o.type_name(),
        }
    }

    fn structure(&self) -> &Structure {
        match self {
            FrameObject::Frozen(s) => s.structure(),
            FrameObject::Editing(o) => o.structure(),
        }
    }

    fn parent(&self) -> Option<ObjectId> {
        match self {
            FrameObject::Frozen(s) => s.parent(),
            FrameObject::Editing(o) => o.parent(),
        }
    }

    fn attribute(&self, key: &str) -> Option<&Variant> {
        match self {
            FrameObject::Frozen(s) => s.attribute(key),
            FrameObject::Editing(o) => o.attribute(key),
        }
    }

    fn attributes(&self) -> &BTreeMap<String, Variant> {
        match self {
            FrameObject::Frozen(s) => s.attributes(),
            FrameObject::Editing(o) => o.attributes(),
        }
    }
}

/// State machine of a transient frame: `Open -> (Accepted | Discarded)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientState {
    Open,
    Accepted,
    Discarded,
}

/// One recorded edit, kept for introspection. Not consulted by `accept`, which
/// re-derives everything from `objects`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Created(ObjectId),
    Removed(ObjectId),
    Mutated(ObjectId),
    AttributeSet { object: ObjectId, key: String },
}

/// A mutable working copy of a design, derived from a base [crate::DesignFrame]
/// (or empty, for the very first frame). Copy-on-write: objects start out [Rc]-shared
/// with the base and are only converted to an owned [TransientObject] when mutated.
#[derive(Debug, Clone)]
pub struct TransientFrame {
    base: Option<poietic_object::FrameId>,
    objects: BTreeMap<ObjectId, FrameObject>,
    mutations: Vec<Mutation>,
    state: TransientState,
}

impl TransientFrame {
    pub(crate) fn new(
        base: Option<poietic_object::FrameId>,
        objects: BTreeMap<ObjectId, Rc<Snapshot>>,
    ) -> Self {
        TransientFrame {
            base,
            objects: objects
                .into_iter()
                .map(|(id, snap)| (id, FrameObject::Frozen(snap)))
                .collect(),
            mutations: Vec::new(),
            state: TransientState::Open,
        }
    }

    pub fn base(&self) -> Option<poietic_object::FrameId> {
        self.base
    }

    pub fn state(&self) -> TransientState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == TransientState::Open
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub(crate) fn set_state(&mut self, state: TransientState) {
        self.state = state;
    }

    pub(crate) fn record(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    pub(crate) fn insert_new(&mut self, id: ObjectId, object: TransientObject) {
        self.objects.insert(id, FrameObject::Editing(object));
    }

    pub(crate) fn remove_entry(&mut self, id: ObjectId) -> Option<FrameObject> {
        self.objects.remove(&id)
    }

    pub(crate) fn objects(&self) -> &BTreeMap<ObjectId, FrameObject> {
        &self.objects
    }

    /// Lazily upgrades an untouched object to an editable [TransientObject],
    /// returning the now-mutable handle. This is the copy-on-write moment.
    pub(crate) fn editing_handle(&mut self, id: ObjectId) -> Option<&mut TransientObject> {
        let entry = self.objects.get_mut(&id)?;
        if let FrameObject::Frozen(snapshot) = entry {
            *entry = FrameObject::Editing(TransientObject::from_snapshot(snapshot));
        }
        match entry {
            FrameObject::Editing(object) => Some(object),
            FrameObject::Frozen(_) => unreachable!("just upgraded above"),
        }
    }
}

impl FrameView for TransientFrame {
    type Object = FrameObject;

    fn object_ids(&self) -> impl Iterator<Item = ObjectId> {
        self.objects.keys().copied()
    }

    fn get(&self, id: ObjectId) -> Option<&FrameObject> {
        self.objects.get(&id)
    }
}
