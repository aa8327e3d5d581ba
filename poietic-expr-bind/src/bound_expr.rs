//! Bound expression tree: identifiers resolved to [crate::BoundRef]s, operators
//! desugared to calls.

use crate::bound_ref::BoundRef;
use poietic_expr::Literal;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpr {
    Literal(Literal),
    Variable(BoundRef),
    /// A user-written call, or an operator desugared to one of the fixed `__add`
    /// etc. built-ins.
    Call { function: String, args: Vec<BoundExpr> },
}

/// The result of binding: a resolved tree, plus every variable name referenced in
/// it, for callers that need to track dependencies without walking the tree
/// themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpression {
    pub(crate) root: BoundExpr,
    pub(crate) all_variables: BTreeSet<String>,
}

impl BoundExpression {
    pub fn root(&self) -> &BoundExpr {
        &self.root
    }

    pub fn all_variables(&self) -> &BTreeSet<String> {
        &self.all_variables
    }
}
