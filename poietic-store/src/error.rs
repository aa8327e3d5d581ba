//! Error taxonomy for the versioned store: input/schema errors surfaced directly at
//! the editing call, and the two batched failure kinds `accept` can return.

use poietic_metamodel::{EdgeCardinalityViolation, EdgeRuleViolation};
use poietic_object::{FrameId, ObjectId, StructuralKind};
use poietic_metamodel::StructuralType;
use poietic_variant::ValueType;
use thiserror::Error;

/// Failures raised directly by an editing call on an open [crate::TransientFrame].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("frame is closed")]
    FrameClosed,
    #[error("unknown object {0}")]
    UnknownObject(ObjectId),
    #[error("unknown frame {0}")]
    UnknownFrame(FrameId),
    #[error("attribute {0:?} is not declared by this object's type")]
    UnknownAttribute(String),
    #[error("attribute {key:?} expects {expected}, got a value of type {found}")]
    AttributeTypeMismatch {
        key: String,
        expected: ValueType,
        found: ValueType,
    },
    #[error("structural mismatch: object requires {expected:?} structure")]
    StructuralMismatch { expected: StructuralType },
    #[error("no undoable frame")]
    NoUndoableFrame,
    #[error("no redoable frame")]
    NoRedoableFrame,
}

/// One constraint's batch of violators, surfaced by `accept`'s constraint-checking
/// pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub constraint: String,
    pub object_ids: Vec<ObjectId>,
}

/// A single problem found during `accept`'s structural-integrity, schema, or
/// edge-rule passes. Batched into [AcceptError::FrameStructuralError].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralIssue {
    #[error("object {object} references {referenced}, which is not present in the frame")]
    DanglingReference { object: ObjectId, referenced: ObjectId },
    #[error("object {object} has unknown type {type_name:?}")]
    UnknownType { object: ObjectId, type_name: String },
    #[error("object {object} has structural kind {found:?}, but its type requires {expected:?}")]
    StructuralTypeMismatch {
        object: ObjectId,
        expected: StructuralType,
        found: StructuralKind,
    },
    #[error("object {object} has unknown attribute {key:?}")]
    UnknownAttribute { object: ObjectId, key: String },
    #[error("object {object} attribute {key:?} expects {expected}, found {found}")]
    AttributeTypeMismatch {
        object: ObjectId,
        key: String,
        expected: ValueType,
        found: ValueType,
    },
    #[error("object {object} is missing required attribute {key:?}")]
    MissingRequiredAttribute { object: ObjectId, key: String },
    #[error("edge rule violated: {0}")]
    EdgeRule(#[from] EdgeRuleViolation),
    #[error("edge cardinality violated: {0}")]
    EdgeCardinality(#[from] EdgeCardinalityViolation),
}

/// Failures raised by [crate::Design::accept].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcceptError {
    #[error("transient frame's base is no longer the current frame")]
    StaleBase,
    #[error("transient frame is closed")]
    FrameClosed,
    #[error("{} structural issue(s) found", .0.len())]
    FrameStructuralError(Vec<StructuralIssue>),
    #[error("{} constraint violation(s) found", .0.len())]
    ConstraintViolation(Vec<ConstraintViolation>),
}
