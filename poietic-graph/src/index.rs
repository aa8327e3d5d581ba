//! [IndexedGraphView]: a cached variant of [crate::GraphView] for frequent readers,
//! trading an up-front O(E) pass for O(1) `outgoing`/`incoming` lookups afterwards.

use crate::view::{Direction, GraphView};
use crate::FrameView;
use poietic_object::{ObjectId, ObjectView, Structure};
use std::collections::HashMap;

pub struct IndexedGraphView<'f, F: FrameView> {
    view: GraphView<'f, F>,
    outgoing_index: HashMap<ObjectId, Vec<ObjectId>>,
    incoming_index: HashMap<ObjectId, Vec<ObjectId>>,
}

impl<'f, F: FrameView> IndexedGraphView<'f, F> {
    pub fn build(frame: &'f F) -> Self {
        let view = GraphView::new(frame);
        let mut outgoing_index: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();
        let mut incoming_index: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();

        for edge_id in view.edge_ids() {
            if let Some(Structure::Edge { origin, target }) =
                frame.get(edge_id).map(|o| o.structure())
            {
                outgoing_index.entry(*origin).or_default().push(edge_id);
                incoming_index.entry(*target).or_default().push(edge_id);
            }
        }

        IndexedGraphView {
            view,
            outgoing_index,
            incoming_index,
        }
    }

    pub fn outgoing(&self, node: ObjectId) -> &[ObjectId] {
        self.outgoing_index.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn incoming(&self, node: ObjectId) -> &[ObjectId] {
        self.incoming_index.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn neighbours(&self, node: ObjectId) -> Vec<ObjectId> {
        let mut result = self.outgoing(node).to_vec();
        result.extend_from_slice(self.incoming(node));
        result
    }

    pub fn hood(
        &self,
        node: ObjectId,
        direction: Direction,
        predicate: impl Fn(&F::Object) -> bool,
    ) -> Vec<ObjectId> {
        let candidates: Vec<ObjectId> = match direction {
            Direction::Outgoing => self.outgoing(node).to_vec(),
            Direction::Incoming => self.incoming(node).to_vec(),
            Direction::Both => self.neighbours(node),
        };
        candidates
            .into_iter()
            .filter(|edge_id| {
                self.view
                    .frame()
                    .get(*edge_id)
                    .map(|edge| predicate(edge))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn view(&self) -> &GraphView<'f, F> {
        &self.view
    }
}
