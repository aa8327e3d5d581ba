//! Versioned store: the central subsystem. A [Design] owns a [poietic_metamodel::Metamodel],
//! every snapshot and frame it has ever accepted, and linear undo/redo history.
//!
//! Resolves the "Cyclic ownership" design note by making [Design] the sole owner of
//! all snapshot and frame storage: frames hold bare ids into the design's arena, and
//! snapshots never point back at the frames that reference them.

mod config;
mod design;
mod error;
mod frame;
mod transient;

pub use config::StoreConfig;
pub use design::Design;
pub use error::{AcceptError, ConstraintViolation, StoreError, StructuralIssue};
pub use frame::DesignFrame;
pub use transient::{FrameObject, Mutation, TransientFrame, TransientState};
