//! The structural payload of a snapshot: what kind of graph element it is, and which
//! other objects it structurally depends on.

use crate::ObjectId;

/// Structural type of an object, matched against [crate::Snapshot::structure].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralKind {
    Unstructured,
    Node,
    Edge,
    OrderedSet,
}

/// The structural payload of a snapshot.
///
/// `Edge` depends on its `origin` and `target`; `OrderedSet` depends on its `owner`.
/// Item references inside an `OrderedSet` are *advisory*: they are pruned on cascading
/// removal rather than causing the set itself to be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Structure {
    Unstructured,
    Node,
    Edge { origin: ObjectId, target: ObjectId },
    OrderedSet { owner: ObjectId, items: Vec<ObjectId> },
}

impl Structure {
    pub fn kind(&self) -> StructuralKind {
        match self {
            Structure::Unstructured => StructuralKind::Unstructured,
            Structure::Node => StructuralKind::Node,
            Structure::Edge { .. } => StructuralKind::Edge,
            Structure::OrderedSet { .. } => StructuralKind::OrderedSet,
        }
    }

    /// Objects this structure structurally depends on (used for cascading removal and
    /// referential-integrity checks). Does *not* include `OrderedSet` items, which are
    /// advisory rather than structural dependencies.
    pub fn dependencies(&self) -> Vec<ObjectId> {
        match self {
            Structure::Unstructured | Structure::Node => Vec::new(),
            Structure::Edge { origin, target } => vec![*origin, *target],
            Structure::OrderedSet { owner, .. } => vec![*owner],
        }
    }

    /// Advisory item references (pruned, not cascaded, when an item is removed).
    pub fn advisory_references(&self) -> &[ObjectId] {
        match self {
            Structure::OrderedSet { items, .. } => items,
            _ => &[],
        }
    }

    /// Removes any advisory reference to `removed` from this structure, in place.
    pub fn prune_advisory_reference(&mut self, removed: ObjectId) {
        if let Structure::OrderedSet { items, .. } = self {
            items.retain(|id| *id != removed);
        }
    }
}
