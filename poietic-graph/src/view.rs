//! [GraphView]: node/edge enumeration, neighbourhoods, default O(E) scans.

use crate::FrameView;
use poietic_object::{ObjectId, ObjectView, Structure};

/// Which side of an edge a neighbourhood traversal looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

/// A read-only graph projection over a `&F` frame.
pub struct GraphView<'f, F: FrameView> {
    frame: &'f F,
}

impl<'f, F: FrameView> GraphView<'f, F> {
    pub fn new(frame: &'f F) -> Self {
        GraphView { frame }
    }

    pub fn node_ids(&self) -> impl Iterator<Item = ObjectId> + 'f {
        let frame = self.frame;
        frame.object_ids().filter(move |id| {
            matches!(
                frame.get(*id).map(|o| o.structure()),
                Some(Structure::Node)
            )
        })
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = ObjectId> + 'f {
        let frame = self.frame;
        frame.object_ids().filter(move |id| {
            matches!(
                frame.get(*id).map(|o| o.structure()),
                Some(Structure::Edge { .. })
            )
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'f F::Object> + 'f {
        let frame = self.frame;
        self.node_ids().map(move |id| frame.get(id).expect("id came from this frame"))
    }

    pub fn edges(&self) -> impl Iterator<Item = &'f F::Object> + 'f {
        let frame = self.frame;
        self.edge_ids().map(move |id| frame.get(id).expect("id came from this frame"))
    }

    fn endpoints(&self, edge_id: ObjectId) -> Option<(ObjectId, ObjectId)> {
        match self.frame.get(edge_id)?.structure() {
            Structure::Edge { origin, target } => Some((*origin, *target)),
            _ => None,
        }
    }

    /// Edges whose origin is `node`. Default O(E) scan; see [crate::IndexedGraphView]
    /// for a cached variant.
    pub fn outgoing(&self, node: ObjectId) -> Vec<ObjectId> {
        self.edge_ids()
            .filter(|edge| self.endpoints(*edge).is_some_and(|(o, _)| o == node))
            .collect()
    }

    pub fn incoming(&self, node: ObjectId) -> Vec<ObjectId> {
        self.edge_ids()
            .filter(|edge| self.endpoints(*edge).is_some_and(|(_, t)| t == node))
            .collect()
    }

    /// All edges incident to `node`, in either direction.
    pub fn neighbours(&self, node: ObjectId) -> Vec<ObjectId> {
        self.edge_ids()
            .filter(|edge| {
                self.endpoints(*edge)
                    .is_some_and(|(o, t)| o == node || t == node)
            })
            .collect()
    }

    /// Neighbourhood filtered by an edge predicate, in the given [Direction].
    pub fn hood(
        &self,
        node: ObjectId,
        direction: Direction,
        predicate: impl Fn(&F::Object) -> bool,
    ) -> Vec<ObjectId> {
        let candidates = match direction {
            Direction::Outgoing => self.outgoing(node),
            Direction::Incoming => self.incoming(node),
            Direction::Both => self.neighbours(node),
        };
        candidates
            .into_iter()
            .filter(|edge_id| {
                self.frame
                    .get(*edge_id)
                    .map(|edge| predicate(edge))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn frame(&self) -> &'f F {
        self.frame
    }
}
