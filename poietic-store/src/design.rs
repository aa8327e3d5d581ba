//! [Design]: the central subsystem. Owns the metamodel, every snapshot and frame ever
//! accepted, and the undo/redo history.

use crate::error::{AcceptError, ConstraintViolation, StoreError, StructuralIssue};
use crate::frame::DesignFrame;
use crate::transient::{FrameObject, Mutation, TransientFrame, TransientState};
use crate::StoreConfig;
use poietic_graph::{FrameView, GraphView};
use poietic_metamodel::{Cardinality, Metamodel};
use poietic_object::{FrameId, IdIssuer, ObjectId, ObjectView, SnapshotId, SnapshotState, Structure};
use poietic_variant::Variant;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// The versioned store for one modeling domain. Single-threaded, single-editor: a
/// `Design` is owned by whoever holds it, not shared across tasks.
pub struct Design {
    metamodel: Metamodel<TransientFrame>,
    config: StoreConfig,
    snapshots: HashMap<SnapshotId, Rc<poietic_object::Snapshot>>,
    frames: HashMap<FrameId, DesignFrame>,
    current_frame: FrameId,
    undo_stack: Vec<FrameId>,
    redo_stack: Vec<FrameId>,
    named_frames: BTreeMap<String, FrameId>,
    object_ids: IdIssuer,
    snapshot_ids: IdIssuer,
    frame_ids: IdIssuer,
}

impl Design {
    /// Opens a fresh design over `metamodel`: one empty `DesignFrame` is its initial
    /// current frame.
    pub fn new(metamodel: Metamodel<TransientFrame>, config: StoreConfig) -> Self {
        let mut frame_ids = IdIssuer::new();
        let initial_id = FrameId::from_raw(frame_ids.next());
        let mut frames = HashMap::new();
        frames.insert(initial_id, DesignFrame::new(initial_id, BTreeMap::new()));

        Design {
            metamodel,
            config,
            snapshots: HashMap::new(),
            frames,
            current_frame: initial_id,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            named_frames: BTreeMap::new(),
            object_ids: IdIssuer::new(),
            snapshot_ids: IdIssuer::new(),
            frame_ids,
        }
    }

    pub fn metamodel(&self) -> &Metamodel<TransientFrame> {
        &self.metamodel
    }

    pub fn current_frame(&self) -> &DesignFrame {
        self.frames
            .get(&self.current_frame)
            .expect("current_frame always points at a retained frame")
    }

    pub fn current_frame_id(&self) -> FrameId {
        self.current_frame
    }

    pub fn frame(&self, id: FrameId) -> Option<&DesignFrame> {
        self.frames.get(&id)
    }

    pub fn frame_by_name(&self, name: &str) -> Option<&DesignFrame> {
        self.named_frames.get(name).and_then(|id| self.frames.get(id))
    }

    /// Every frame currently retained in the design's arena, accepted or not yet
    /// garbage-collected (current frame, undo/redo history, and named frames).
    pub fn frames(&self) -> impl Iterator<Item = &DesignFrame> {
        self.frames.values()
    }

    pub fn named_frames(&self) -> impl Iterator<Item = (&str, FrameId)> {
        self.named_frames.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn undo_stack(&self) -> &[FrameId] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[FrameId] {
        &self.redo_stack
    }

    /// Binds `name` to `id`. A name collision replaces the prior binding.
    pub fn name_frame(&mut self, id: FrameId, name: impl Into<String>) -> Result<(), StoreError> {
        if !self.frames.contains_key(&id) {
            return Err(StoreError::UnknownFrame(id));
        }
        self.named_frames.insert(name.into(), id);
        Ok(())
    }

    pub fn forget_name(&mut self, name: &str) -> Option<FrameId> {
        let id = self.named_frames.remove(name);
        if id.is_some() {
            self.collect_garbage();
        }
        id
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Derives a new [TransientFrame] copy-on-write over `base` (or the current frame
    /// if `None`).
    pub fn create_frame(&self, base: Option<FrameId>) -> Result<TransientFrame, StoreError> {
        let base_id = base.unwrap_or(self.current_frame);
        let base_frame = self.frames.get(&base_id).ok_or(StoreError::UnknownFrame(base_id))?;
        Ok(TransientFrame::new(Some(base_id), base_frame.objects().clone()))
    }

    fn check_open(frame: &TransientFrame) -> Result<(), StoreError> {
        if frame.is_open() {
            Ok(())
        } else {
            Err(StoreError::FrameClosed)
        }
    }

    /// Creates a new transient object. `attributes` are taken as given; schema
    /// validity against the object's type is checked by `accept`, not at creation
    /// time.
    pub fn create(
        &mut self,
        frame: &mut TransientFrame,
        type_name: impl Into<String>,
        structure: Structure,
        parent: Option<ObjectId>,
        attributes: BTreeMap<String, Variant>,
    ) -> Result<ObjectId, StoreError> {
        Self::check_open(frame)?;
        let id = ObjectId::from_raw(self.object_ids.next());
        let object = poietic_object::TransientObject::new(id, type_name, structure, parent, attributes);
        frame.insert_new(id, object);
        frame.record(Mutation::Created(id));
        Ok(id)
    }

    /// Removes a single object. Any advisory (ordered-set) references to it are
    /// pruned from the rest of the frame; referential integrity of structural fields
    /// is left for `accept` to catch.
    pub fn remove(&mut self, frame: &mut TransientFrame, id: ObjectId) -> Result<(), StoreError> {
        Self::check_open(frame)?;
        frame
            .remove_entry(id)
            .ok_or(StoreError::UnknownObject(id))?;
        self.prune_advisory_references(frame, id);
        frame.record(Mutation::Removed(id));
        Ok(())
    }

    /// Removes `id` and every object whose structural-dependency (or containment)
    /// chain transitively includes it. The closure is computed first, then the whole
    /// set is deleted together so no dependent ever observes a half-removed frame.
    pub fn remove_cascading(
        &mut self,
        frame: &mut TransientFrame,
        id: ObjectId,
    ) -> Result<Vec<ObjectId>, StoreError> {
        Self::check_open(frame)?;
        if frame.get(id).is_none() {
            return Err(StoreError::UnknownObject(id));
        }

        let mut closure: HashSet<ObjectId> = HashSet::new();
        closure.insert(id);
        loop {
            let mut grew = false;
            for object_id in frame.object_ids().collect::<Vec<_>>() {
                if closure.contains(&object_id) {
                    continue;
                }
                let Some(object) = frame.get(object_id) else { continue };
                let depends_on_closure = object
                    .structure()
                    .dependencies()
                    .iter()
                    .any(|dep| closure.contains(dep))
                    || object.parent().is_some_and(|p| closure.contains(&p));
                if depends_on_closure {
                    closure.insert(object_id);
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }

        let mut removed: Vec<ObjectId> = closure.into_iter().collect();
        removed.sort();
        for object_id in &removed {
            frame.remove_entry(*object_id);
        }
        for object_id in &removed {
            self.prune_advisory_references(frame, *object_id);
            frame.record(Mutation::Removed(*object_id));
        }
        Ok(removed)
    }

    fn prune_advisory_references(&self, frame: &mut TransientFrame, removed: ObjectId) {
        let holders: Vec<ObjectId> = frame
            .objects()
            .iter()
            .filter(|(_, object)| object.structure().advisory_references().contains(&removed))
            .map(|(id, _)| *id)
            .collect();
        for holder in holders {
            if let Some(object) = frame.editing_handle(holder) {
                object.prune_advisory_reference(removed);
            }
        }
    }

    /// Returns a mutable handle to `id`, upgrading it to an editable
    /// [poietic_object::TransientObject] on first touch (copy-on-write).
    pub fn mutate<'f>(
        &mut self,
        frame: &'f mut TransientFrame,
        id: ObjectId,
    ) -> Result<&'f mut poietic_object::TransientObject, StoreError> {
        Self::check_open(frame)?;
        frame.record(Mutation::Mutated(id));
        frame.editing_handle(id).ok_or(StoreError::UnknownObject(id))
    }

    /// Sets an attribute, resolving its declared [poietic_variant::ValueType] from the
    /// object's type in the metamodel before delegating to the object model.
    pub fn set_attribute(
        &mut self,
        frame: &mut TransientFrame,
        id: ObjectId,
        key: &str,
        value: Variant,
    ) -> Result<(), StoreError> {
        Self::check_open(frame)?;
        let type_name = frame
            .get(id)
            .ok_or(StoreError::UnknownObject(id))?
            .type_name()
            .to_string();
        let declared = self.declared_attribute_type(&type_name, key);
        let object = frame.editing_handle(id).ok_or(StoreError::UnknownObject(id))?;
        object.set_attribute(key, value, declared).map_err(|e| match e {
            poietic_object::ObjectError::UnknownAttribute(k) => StoreError::UnknownAttribute(k),
            poietic_object::ObjectError::AttributeTypeMismatch { key, expected, found } => {
                StoreError::AttributeTypeMismatch { key, expected, found }
            }
        })?;
        frame.record(Mutation::AttributeSet {
            object: id,
            key: key.to_string(),
        });
        Ok(())
    }

    fn declared_attribute_type(&self, type_name: &str, key: &str) -> Option<poietic_variant::ValueType> {
        let object_type = self.metamodel.object_type(type_name)?;
        object_type
            .resolve_attributes(|name| self.metamodel.trait_def(name))
            .into_iter()
            .find(|a| a.name() == key)
            .map(|a| a.value_type())
    }

    /// Inserts `item` into an `OrderedSet`-structured object's item list at `index`
    /// (or at the end, if `index` is past the current length).
    pub fn insert_ordered_set_item(
        &mut self,
        frame: &mut TransientFrame,
        owner_id: ObjectId,
        index: usize,
        item: ObjectId,
    ) -> Result<(), StoreError> {
        Self::check_open(frame)?;
        let object = frame.editing_handle(owner_id).ok_or(StoreError::UnknownObject(owner_id))?;
        let Structure::OrderedSet { owner, items } = object.structure().clone() else {
            return Err(StoreError::StructuralMismatch {
                expected: poietic_metamodel::StructuralType::OrderedSet,
            });
        };
        let mut items = items;
        let at = index.min(items.len());
        items.insert(at, item);
        object.set_structure(Structure::OrderedSet { owner, items });
        frame.record(Mutation::AttributeSet {
            object: owner_id,
            key: "items".to_string(),
        });
        Ok(())
    }

    /// Marks a transient frame discarded. Idempotent: discarding an already-discarded
    /// (or already-accepted) frame is a no-op.
    pub fn discard(&self, frame: &mut TransientFrame) {
        if frame.state() == TransientState::Open {
            frame.set_state(TransientState::Discarded);
        }
    }

    /// Cheap query for UIs: would `accept` succeed right now? Uses the early-exit
    /// constraint mode, stopping at the first violation found.
    pub fn would_accept(&self, frame: &TransientFrame) -> bool {
        if frame.state() != TransientState::Open {
            return false;
        }
        if Some(self.current_frame) != frame.base() {
            return false;
        }
        if !self.structural_issues(frame).is_empty() {
            return false;
        }
        self.metamodel
            .constraints()
            .all(|c| c.check(frame).is_empty())
    }

    /// Runs the ordered, deterministic accept algorithm (structural checks, then
    /// edge rules, then constraints) and, on success, installs a new current frame.
    pub fn accept(&mut self, frame: &mut TransientFrame) -> Result<FrameId, AcceptError> {
        if frame.state() != TransientState::Open {
            return Err(AcceptError::FrameClosed);
        }
        let Some(base) = frame.base() else {
            return Err(AcceptError::StaleBase);
        };
        if base != self.current_frame {
            warn!(?base, current = ?self.current_frame, "accept rejected: stale base");
            return Err(AcceptError::StaleBase);
        }

        debug!(base = ?base, "accept: checking structural integrity and schema");
        let issues = self.structural_issues(frame);
        if !issues.is_empty() {
            return Err(AcceptError::FrameStructuralError(issues));
        }

        debug!("accept: checking constraints");
        let violations = self.constraint_violations(frame);
        if !violations.is_empty() {
            return Err(AcceptError::ConstraintViolation(violations));
        }

        Ok(self.install(frame))
    }

    fn structural_issues(&self, frame: &TransientFrame) -> Vec<StructuralIssue> {
        let mut issues = Vec::new();

        for id in frame.object_ids() {
            let object = frame.get(id).expect("id came from this frame");

            for dep in object.structure().dependencies() {
                if frame.get(dep).is_none() {
                    issues.push(StructuralIssue::DanglingReference { object: id, referenced: dep });
                }
            }
            if let Some(parent) = object.parent() {
                if frame.get(parent).is_none() {
                    issues.push(StructuralIssue::DanglingReference { object: id, referenced: parent });
                }
            }

            let Some(object_type) = self.metamodel.object_type(object.type_name()) else {
                issues.push(StructuralIssue::UnknownType {
                    object: id,
                    type_name: object.type_name().to_string(),
                });
                continue;
            };
            if !object_type.structural_type().matches(object.structure()) {
                issues.push(StructuralIssue::StructuralTypeMismatch {
                    object: id,
                    expected: object_type.structural_type(),
                    found: object.structure().kind(),
                });
            }

            let declared = object_type.resolve_attributes(|name| self.metamodel.trait_def(name));
            for (key, value) in object.attributes() {
                match declared.iter().find(|a| a.name() == key) {
                    None => issues.push(StructuralIssue::UnknownAttribute { object: id, key: key.clone() }),
                    Some(attribute) => {
                        if !value.matches_type(attribute.value_type()) {
                            issues.push(StructuralIssue::AttributeTypeMismatch {
                                object: id,
                                key: key.clone(),
                                expected: attribute.value_type(),
                                found: value.value_type().unwrap_or(attribute.value_type()),
                            });
                        }
                    }
                }
            }
            for attribute in &declared {
                if attribute.is_required() && !object.attributes().contains_key(attribute.name()) {
                    issues.push(StructuralIssue::MissingRequiredAttribute {
                        object: id,
                        key: attribute.name().to_string(),
                    });
                }
            }
        }

        issues.extend(self.edge_rule_issues(frame));
        issues
    }

    fn edge_rule_issues(&self, frame: &TransientFrame) -> Vec<StructuralIssue> {
        let view = GraphView::new(frame);
        let mut issues = Vec::new();

        for rule in self.metamodel.edge_rules() {
            let edges: Vec<ObjectId> = view
                .edge_ids()
                .filter(|id| frame.get(*id).is_some_and(|o| o.type_name() == rule.edge_type()))
                .collect();

            let mut by_origin: HashMap<ObjectId, usize> = HashMap::new();
            let mut by_target: HashMap<ObjectId, usize> = HashMap::new();

            for edge_id in &edges {
                let object = frame.get(*edge_id).expect("collected from this frame");
                let Structure::Edge { origin, target } = object.structure() else {
                    continue;
                };
                *by_origin.entry(*origin).or_insert(0) += 1;
                *by_target.entry(*target).or_insert(0) += 1;

                let origin_type = frame.get(*origin).map(|o| o.type_name()).unwrap_or("");
                let target_type = frame.get(*target).map(|o| o.type_name()).unwrap_or("");
                if let Err(violation) = rule.check_endpoint_types(*edge_id, origin_type, target_type) {
                    trace!(edge = ?edge_id, "edge rule endpoint violation");
                    issues.push(StructuralIssue::EdgeRule(violation));
                }
            }

            if rule.origin_cardinality() != Cardinality::Unbounded {
                for (node, count) in &by_origin {
                    if !rule.origin_cardinality().is_satisfied_by(*count) {
                        issues.push(StructuralIssue::EdgeCardinality(poietic_metamodel::EdgeCardinalityViolation {
                            node_id: *node,
                            rule: rule.clone(),
                        }));
                    }
                }
            }
            if rule.target_cardinality() != Cardinality::Unbounded {
                for (node, count) in &by_target {
                    if !rule.target_cardinality().is_satisfied_by(*count) {
                        issues.push(StructuralIssue::EdgeCardinality(poietic_metamodel::EdgeCardinalityViolation {
                            node_id: *node,
                            rule: rule.clone(),
                        }));
                    }
                }
            }
        }

        issues
    }

    fn constraint_violations(&self, frame: &TransientFrame) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();
        for constraint in self.metamodel.constraints() {
            trace!(constraint = constraint.name(), "checking constraint");
            let violators = constraint.check(frame);
            if !violators.is_empty() {
                let hit = ConstraintViolation {
                    constraint: constraint.name().to_string(),
                    object_ids: violators,
                };
                let should_stop = self.config.early_exit_constraints;
                violations.push(hit);
                if should_stop {
                    break;
                }
            }
        }
        violations
    }

    fn install(&mut self, frame: &mut TransientFrame) -> FrameId {
        let mut objects = BTreeMap::new();
        for (id, object) in frame.objects().clone() {
            let snapshot = match object {
                FrameObject::Frozen(snapshot) => snapshot,
                FrameObject::Editing(transient) => {
                    let snapshot_id = SnapshotId::from_raw(self.snapshot_ids.next());
                    Rc::new(transient.into_snapshot(snapshot_id, SnapshotState::Frozen))
                }
            };
            self.snapshots.insert(snapshot.snapshot_id(), snapshot.clone());
            objects.insert(id, snapshot);
        }

        let new_id = FrameId::from_raw(self.frame_ids.next());
        self.frames.insert(new_id, DesignFrame::new(new_id, objects));

        self.undo_stack.push(self.current_frame);
        self.redo_stack.clear();
        self.current_frame = new_id;
        frame.set_state(TransientState::Accepted);

        if let Some(max) = self.config.max_history_size {
            while self.undo_stack.len() > max {
                self.undo_stack.remove(0);
            }
        }
        self.collect_garbage();
        debug!(frame = ?new_id, "accept: installed new current frame");
        new_id
    }

    pub fn undo(&mut self) -> Result<FrameId, StoreError> {
        let previous = self.undo_stack.pop().ok_or(StoreError::NoUndoableFrame)?;
        self.redo_stack.push(self.current_frame);
        self.current_frame = previous;
        debug!(frame = ?previous, "undo");
        Ok(previous)
    }

    pub fn redo(&mut self) -> Result<FrameId, StoreError> {
        let next = self.redo_stack.pop().ok_or(StoreError::NoRedoableFrame)?;
        self.undo_stack.push(self.current_frame);
        self.current_frame = next;
        debug!(frame = ?next, "redo");
        Ok(next)
    }

    /// Mark-and-sweep GC: drops any frame (and, transitively, any snapshot) no longer
    /// reachable from the current frame, the undo/redo stacks, or a named frame.
    fn collect_garbage(&mut self) {
        let retained: HashSet<FrameId> = std::iter::once(self.current_frame)
            .chain(self.undo_stack.iter().copied())
            .chain(self.redo_stack.iter().copied())
            .chain(self.named_frames.values().copied())
            .collect();

        self.frames.retain(|id, _| retained.contains(id));

        let live_snapshots: HashSet<SnapshotId> = self
            .frames
            .values()
            .flat_map(|f| f.objects().values().map(|s| s.snapshot_id()))
            .collect();
        let before = self.snapshots.len();
        self.snapshots.retain(|id, _| live_snapshots.contains(id));
        if self.snapshots.len() != before {
            trace!(dropped = before - self.snapshots.len(), "gc: swept unreachable snapshots");
        }
    }
}

/// A read-only graph view over the store's current frame.
impl Design {
    pub fn current_graph(&self) -> GraphView<'_, DesignFrame> {
        GraphView::new(self.current_frame())
    }
}
