//! Kahn's algorithm for topological sort and cycle detection over a frame's graph.

use crate::view::GraphView;
use crate::FrameView;
use poietic_object::{ObjectId, ObjectView, Structure};
use std::collections::{BTreeSet, HashMap};

/// Result of [topological_sort]: either a total order consistent with every edge, or
/// the edges that could never be removed from the working set (a cycle witness).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopoOutcome {
    Sorted(Vec<ObjectId>),
    Cycle { edges: Vec<ObjectId> },
}

/// Kahn's algorithm: in-degree initialised from `edges`, ties between ready nodes
/// broken by ascending [ObjectId] for determinism. `edges` is `(edge_id, origin,
/// target)`.
pub fn topological_sort(
    nodes: impl IntoIterator<Item = ObjectId>,
    edges: impl IntoIterator<Item = (ObjectId, ObjectId, ObjectId)>,
) -> TopoOutcome {
    let nodes: BTreeSet<ObjectId> = nodes.into_iter().collect();
    let edges: Vec<(ObjectId, ObjectId, ObjectId)> = edges.into_iter().collect();

    let mut in_degree: HashMap<ObjectId, usize> = nodes.iter().map(|n| (*n, 0)).collect();
    let mut outgoing: HashMap<ObjectId, Vec<(ObjectId, ObjectId)>> = HashMap::new();
    for (edge_id, origin, target) in &edges {
        *in_degree.entry(*target).or_insert(0) += 1;
        outgoing.entry(*origin).or_default().push((*target, *edge_id));
    }

    // Nodes ready to emit: zero in-degree, ordered ascending for a deterministic tie-break.
    let mut ready: BTreeSet<ObjectId> = nodes
        .iter()
        .copied()
        .filter(|n| in_degree.get(n).copied().unwrap_or(0) == 0)
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    let mut remaining_edges: BTreeSet<ObjectId> = edges.iter().map(|(id, _, _)| *id).collect();

    while let Some(&next) = ready.iter().next() {
        ready.remove(&next);
        order.push(next);
        if let Some(outs) = outgoing.get(&next) {
            for (target, edge_id) in outs {
                remaining_edges.remove(edge_id);
                let deg = in_degree.get_mut(target).expect("target was registered");
                *deg -= 1;
                if *deg == 0 {
                    ready.insert(*target);
                }
            }
        }
    }

    if order.len() == nodes.len() {
        TopoOutcome::Sorted(order)
    } else {
        TopoOutcome::Cycle {
            edges: remaining_edges.into_iter().collect(),
        }
    }
}

impl<'f, F: FrameView> GraphView<'f, F> {
    pub fn topological_sort(&self) -> TopoOutcome {
        topological_sort(self.node_ids(), self.edge_triples())
    }

    /// Same algorithm as [topological_sort], returning just the cycle witness (empty
    /// if the graph is acyclic).
    pub fn cycles(&self) -> Vec<ObjectId> {
        match self.topological_sort() {
            TopoOutcome::Sorted(_) => Vec::new(),
            TopoOutcome::Cycle { edges } => edges,
        }
    }

    fn edge_triples(&self) -> Vec<(ObjectId, ObjectId, ObjectId)> {
        self.edge_ids()
            .filter_map(|edge_id| match self.frame().get(edge_id)?.structure() {
                Structure::Edge { origin, target } => Some((edge_id, *origin, *target)),
                _ => None,
            })
            .collect()
    }
}
