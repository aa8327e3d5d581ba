//! Resolves parsed expression trees against a set of named variables and callable
//! functions, producing a tree ready for evaluation.

mod binder;
mod bound_expr;
mod bound_ref;
mod error;
mod function;

pub use binder::Binder;
pub use bound_expr::{BoundExpr, BoundExpression};
pub use bound_ref::{BoundRef, VariableId};
pub use error::BindError;
pub use function::FunctionSignature;

#[cfg(test)]
mod tests;
