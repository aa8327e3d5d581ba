//! [Requirement]: constraint bodies that inspect a set of already-matched objects and
//! report which of them violate the rule.

use crate::Predicate;
use poietic_graph::{Direction, FrameView, GraphView};
use poietic_object::{ObjectId, ObjectView, Structure};
use std::collections::HashMap;

/// What a constraint actually checks, once [crate::Predicate::matches] has selected
/// which objects are in scope. Execution is pure: no mutation, no side effects.
pub enum Requirement<F: FrameView> {
    AllSatisfy(Predicate<F>),
    RejectAll,
    AcceptAll,
    UniqueProperty(String),
    UniqueNeighbour {
        predicate: Predicate<F>,
        direction: Direction,
        required: bool,
    },
    EdgeEndpointTypes {
        origin: Option<Predicate<F>>,
        target: Option<Predicate<F>>,
        edge: Option<Predicate<F>>,
    },
}

impl<F: FrameView> Clone for Requirement<F> {
    fn clone(&self) -> Self {
        match self {
            Requirement::AllSatisfy(p) => Requirement::AllSatisfy(p.clone()),
            Requirement::RejectAll => Requirement::RejectAll,
            Requirement::AcceptAll => Requirement::AcceptAll,
            Requirement::UniqueProperty(key) => Requirement::UniqueProperty(key.clone()),
            Requirement::UniqueNeighbour {
                predicate,
                direction,
                required,
            } => Requirement::UniqueNeighbour {
                predicate: predicate.clone(),
                direction: *direction,
                required: *required,
            },
            Requirement::EdgeEndpointTypes { origin, target, edge } => Requirement::EdgeEndpointTypes {
                origin: origin.clone(),
                target: target.clone(),
                edge: edge.clone(),
            },
        }
    }
}

impl<F: FrameView> Requirement<F> {
    /// Returns the ids, among `objects`, that violate this requirement.
    pub fn check(&self, frame: &F, objects: &[ObjectId]) -> Vec<ObjectId> {
        match self {
            Requirement::AllSatisfy(predicate) => objects
                .iter()
                .copied()
                .filter(|id| {
                    frame
                        .get(*id)
                        .is_none_or(|o| !predicate.matches(o, frame))
                })
                .collect(),
            Requirement::RejectAll => objects.to_vec(),
            Requirement::AcceptAll => Vec::new(),
            Requirement::UniqueProperty(key) => Self::unique_property(frame, objects, key),
            Requirement::UniqueNeighbour {
                predicate,
                direction,
                required,
            } => Self::unique_neighbour(frame, objects, predicate, *direction, *required),
            Requirement::EdgeEndpointTypes { origin, target, edge } => {
                Self::edge_endpoint_types(frame, objects, origin, target, edge)
            }
        }
    }

    fn unique_property(frame: &F, objects: &[ObjectId], key: &str) -> Vec<ObjectId> {
        let mut by_value: HashMap<String, Vec<ObjectId>> = HashMap::new();
        for id in objects {
            if let Some(value) = frame.get(*id).and_then(|o| o.attribute(key)) {
                by_value
                    .entry(format!("{value:?}"))
                    .or_default()
                    .push(*id);
            }
        }
        let mut violators: Vec<ObjectId> = by_value
            .into_values()
            .filter(|ids| ids.len() > 1)
            .flatten()
            .collect();
        violators.sort();
        violators
    }

    fn unique_neighbour(
        frame: &F,
        objects: &[ObjectId],
        predicate: &Predicate<F>,
        direction: Direction,
        required: bool,
    ) -> Vec<ObjectId> {
        let view = GraphView::new(frame);
        objects
            .iter()
            .copied()
            .filter(|id| {
                let count = view
                    .hood(*id, direction, |edge| predicate.matches(edge, frame))
                    .len();
                count > 1 || (required && count == 0)
            })
            .collect()
    }

    fn edge_endpoint_types(
        frame: &F,
        objects: &[ObjectId],
        origin: &Option<Predicate<F>>,
        target: &Option<Predicate<F>>,
        edge: &Option<Predicate<F>>,
    ) -> Vec<ObjectId> {
        objects
            .iter()
            .copied()
            .filter(|id| {
                let Some(object) = frame.get(*id) else {
                    return true;
                };
                let Structure::Edge {
                    origin: origin_id,
                    target: target_id,
                } = object.structure()
                else {
                    return true;
                };
                if let Some(p) = edge {
                    if !p.matches(object, frame) {
                        return true;
                    }
                }
                if let Some(p) = origin {
                    if !frame.get(*origin_id).is_some_and(|o| p.matches(o, frame)) {
                        return true;
                    }
                }
                if let Some(p) = target {
                    if !frame.get(*target_id).is_some_and(|o| p.matches(o, frame)) {
                        return true;
                    }
                }
                false
            })
            .collect()
    }
}
