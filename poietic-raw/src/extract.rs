//! Extracts a [RawDesign] from a live [Design].

use crate::raw::{RawDesign, RawFrame, RawSnapshot};
use poietic_object::{ObjectId, ObjectView, Structure};
use poietic_store::{Design, DesignFrame};
use std::collections::{BTreeMap, HashSet};

/// Flattens every retained frame of `design` (current, undo/redo history, and named
/// frames) into a [RawDesign] with no loss of fidelity.
pub fn extract(design: &Design) -> RawDesign {
    extract_inner(design, None)
}

/// Flattens only `design`'s current frame, keeping objects in `selected` and pruning
/// the rest:
/// - nodes and unstructured objects are kept outright;
/// - an edge is kept only if both its origin and target are in `selected`;
/// - an ordered set is kept only if its owner is in `selected`; item references to
///   objects outside `selected` are dropped from it rather than dropping the set;
/// - a parent reference to an object outside `selected` becomes `None`.
pub fn extract_selection(design: &Design, selected: &HashSet<ObjectId>) -> RawDesign {
    extract_inner(design, Some(selected))
}

fn extract_inner(design: &Design, selected: Option<&HashSet<ObjectId>>) -> RawDesign {
    let metamodel = design.metamodel();

    let frames: Vec<&DesignFrame> = match selected {
        None => design.frames().collect(),
        Some(_) => vec![design.current_frame()],
    };

    let mut raw_snapshots: BTreeMap<_, RawSnapshot> = BTreeMap::new();
    let mut raw_frames = Vec::with_capacity(frames.len());

    for frame in &frames {
        let mut snapshot_ids = Vec::new();
        for id in frame.object_ids() {
            let snapshot = frame.get(id).expect("id came from this frame");
            if let Some(selected) = selected {
                if !selected.contains(&id) || !keep(snapshot.structure(), selected) {
                    continue;
                }
            }
            snapshot_ids.push(snapshot.snapshot_id());
            raw_snapshots
                .entry(snapshot.snapshot_id())
                .or_insert_with(|| to_raw_snapshot(snapshot, selected));
        }
        raw_frames.push(RawFrame { id: frame.id(), snapshots: snapshot_ids });
    }

    let user_references = design.named_frames().map(|(name, id)| (name.to_string(), id)).collect();

    let mut system_references = BTreeMap::new();
    system_references.insert("current_frame".to_string(), design.current_frame_id());

    let mut system_lists = BTreeMap::new();
    system_lists.insert("undo".to_string(), design.undo_stack().to_vec());
    system_lists.insert("redo".to_string(), design.redo_stack().to_vec());

    RawDesign {
        metamodel_name: metamodel.name().to_string(),
        metamodel_version: metamodel.version().map(str::to_string),
        snapshots: raw_snapshots.into_values().collect(),
        frames: raw_frames,
        user_references,
        system_references,
        system_lists,
    }
}

fn keep(structure: &Structure, selected: &HashSet<ObjectId>) -> bool {
    match structure {
        Structure::Unstructured | Structure::Node => true,
        Structure::Edge { origin, target } => selected.contains(origin) && selected.contains(target),
        Structure::OrderedSet { owner, .. } => selected.contains(owner),
    }
}

fn to_raw_snapshot(
    snapshot: &poietic_object::Snapshot,
    selected: Option<&HashSet<ObjectId>>,
) -> RawSnapshot {
    let mut structure = snapshot.structure().clone();
    if let (Structure::OrderedSet { .. }, Some(selected)) = (&structure, selected) {
        if let Structure::OrderedSet { items, .. } = &mut structure {
            items.retain(|item| selected.contains(item));
        }
    }

    let parent = match (snapshot.parent(), selected) {
        (Some(parent), Some(selected)) if !selected.contains(&parent) => None,
        (parent, _) => parent,
    };

    RawSnapshot {
        type_name: snapshot.type_name().to_string(),
        snapshot_id: snapshot.snapshot_id(),
        id: snapshot.object_id(),
        structure,
        parent,
        attributes: snapshot.attributes().clone(),
    }
}
