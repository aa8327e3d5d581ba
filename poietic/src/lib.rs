//! Poietic Core: a versioned, constraint-validated, typed object graph data layer
//! for visual modeling tools.
//!
//! Re-exports the whole stack (tagged values, the metamodel schema, the object
//! model, the versioned store, the graph view, predicates/constraints, the
//! expression lexer/parser/binder, and the raw interchange format), plus a
//! ready-made Stock-and-Flow metamodel for examples and quick experiments.

pub use poietic_expr::{BinaryOp, Expr, LexErrorKind, Lexer, Literal, ParseError, Parser, Token, TokenKind, UnaryOp};
pub use poietic_expr_bind::{BindError, Binder, BoundExpr, BoundExpression, BoundRef, FunctionSignature, VariableId};
pub use poietic_graph::{FrameView, GraphView, TopoOutcome};
pub use poietic_metamodel::{
    Attribute, Cardinality, Constraint, EdgeCardinalityViolation, EdgeRule, EdgeRuleViolation, MergeConflict,
    Metamodel, ObjectType, Requirement, StructuralType, Trait,
};
pub use poietic_object::{
    FrameId, IdIssuer, IdOverflow, ObjectError, ObjectId, ObjectView, Snapshot, SnapshotId, SnapshotState,
    Structure, StructuralKind, TransientObject,
};
pub use poietic_predicates::Predicate;
pub use poietic_raw::{extract, extract_selection, RawDesign, RawFrame, RawSnapshot};
pub use poietic_store::{
    AcceptError, ConstraintViolation, Design, DesignFrame, FrameObject, Mutation, StoreConfig, StoreError,
    StructuralIssue, TransientFrame, TransientState,
};
pub use poietic_variant::{AtomType, ConversionError, Point, Variant, ValueType};

mod stock_flow;
pub use stock_flow::stock_flow_metamodel;

#[cfg(test)]
mod tests;
