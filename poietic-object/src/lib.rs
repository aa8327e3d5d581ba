//! Object model: identifiers, immutable [Snapshot] versions of a design object, and
//! mutable [TransientObject]s used while editing.
//!
//! Snapshots never reference their containing frame: a [Snapshot] only ever points at
//! other objects by [ObjectId], never at the frame(s) that hold it. Schema validation
//! (does this attribute key exist on some trait of the object's type?) is injected by
//! the caller as a `declared: Option<ValueType>` lookup result, so this crate never
//! needs to depend on the metamodel crate; the versioned store performs the metamodel
//! lookup and passes the answer down.

mod ids;
mod snapshot;
mod structure;
mod transient;

pub use ids::{FrameId, IdIssuer, IdOverflow, ObjectId, SnapshotId};
pub use snapshot::{Snapshot, SnapshotState};
pub use structure::{Structure, StructuralKind};
pub use transient::{ObjectError, TransientObject};

use poietic_variant::Variant;
use std::collections::BTreeMap;

/// Read-only view shared by [crate::Snapshot] and [TransientObject]: the common shape
/// that predicates and the graph view need, regardless of whether the underlying
/// object has been frozen yet.
pub trait ObjectView {
    fn object_id(&self) -> ObjectId;
    fn type_name(&self) -> &str;
    fn structure(&self) -> &Structure;
    fn parent(&self) -> Option<ObjectId>;
    fn attribute(&self, key: &str) -> Option<&Variant>;
    fn attributes(&self) -> &BTreeMap<String, Variant>;
}

#[cfg(test)]
mod tests;
